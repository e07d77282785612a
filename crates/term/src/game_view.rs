//! GameView: maps a `core::GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSession, Grid, Piece};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceValue, Screen, Vec2};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const SCREEN_BG: Rgb = Rgb::new(245, 245, 245);
const TEXT: CellStyle = CellStyle::new(Rgb::BLACK, SCREEN_BG);
const TITLE: CellStyle = TEXT.bold();
const HINT: CellStyle = CellStyle::new(Rgb::new(130, 130, 130), SCREEN_BG);

/// A lightweight terminal renderer for the 2048 screens.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current session into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, session: &GameSession, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', CellStyle::default()));

        match session.screen() {
            Screen::Start => self.draw_start(fb, viewport),
            Screen::Gameplay => self.draw_gameplay(fb, session, viewport),
            Screen::Loss => self.draw_loss(fb, session, viewport),
            Screen::Win => self.draw_win(fb, session, viewport),
        }

        if let Some(opacity) = session.overlay_opacity() {
            draw_fade_overlay(fb, opacity);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut fb);
        fb
    }

    /// Top-left terminal cell of the grid frame.
    pub fn grid_origin(&self, grid: &Grid, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = grid.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    fn draw_start(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let y = viewport.height / 3;
        fb.put_str_centered(0, viewport.width, y, "Press SPACE to Start!", TITLE);
        fb.put_str_centered(0, viewport.width, y + 2, "arrows / wasd / hjkl to move, q to quit", HINT);
    }

    fn draw_loss(&self, fb: &mut FrameBuffer, session: &GameSession, viewport: Viewport) {
        let highest = format!("Highest Piece Value: {}", session.highest_piece().label());
        self.draw_result(fb, viewport, "Game Over!", "Press 'R' to try again", &highest);
    }

    fn draw_win(&self, fb: &mut FrameBuffer, session: &GameSession, viewport: Viewport) {
        let played = format!("Time Played: {}", session.play_time());
        self.draw_result(fb, viewport, "You Win!", "Press 'R' to play again", &played);
    }

    fn draw_result(&self, fb: &mut FrameBuffer, viewport: Viewport, title: &str, hint: &str, detail: &str) {
        let mid = viewport.height / 2;
        let w = viewport.width;
        fb.put_str_centered(0, w, mid.saturating_sub(2), title, TITLE);
        fb.put_str_centered(0, w, mid, hint, HINT);
        fb.put_str_centered(0, w, mid + 2, detail, TEXT);
    }

    fn draw_gameplay(&self, fb: &mut FrameBuffer, session: &GameSession, viewport: Viewport) {
        let grid = session.grid();
        let origin = self.grid_origin(grid, viewport);

        draw_grid(fb, grid, origin);

        // Settled tiles first so sliding ones pass over them.
        let board = session.board();
        for sliding in [false, true] {
            let pieces = board
                .pieces()
                .filter(|(_, _, piece)| !piece.is_empty() && piece.is_animating() == sliding);
            for (col, row, piece) in pieces {
                draw_piece(fb, grid, origin, col, row, piece);
            }
        }

        self.draw_side_panel(fb, session, viewport, origin);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, session: &GameSession, viewport: Viewport, origin: (u16, u16)) {
        let (frame_w, _) = session.grid().frame_size();
        let panel_x = origin.0.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let mut y = origin.1;
        fb.put_str(panel_x, y, "TIME", TITLE);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &session.game_time().to_string(), TEXT);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", TITLE);
        y = y.saturating_add(1);
        let best = session.board().highest_value();
        fb.put_str(panel_x, y, if best.is_empty() { "-" } else { best.label() }, TEXT);
    }
}

/// Wash the whole frame toward white.
///
/// Shared by every screen so a crossfade looks the same whichever screen is
/// active while it runs.
pub fn draw_fade_overlay(fb: &mut FrameBuffer, opacity: f32) {
    fb.blend_toward(Rgb::WHITE, opacity);
}

/// Tile color: pale yellow for 2 shading to saturated red at 2048.
pub fn piece_color(value: PieceValue) -> Option<Rgb> {
    if value.is_empty() {
        return None;
    }
    let t = (value.rank() - 1) as f32 / (PieceValue::MAX.rank() - 1) as f32;
    let hue = 60.0 + (0.0 - 60.0) * t;
    let saturation = 0.2 + (1.0 - 0.2) * t;
    Some(Rgb::from_hsv(hue, saturation, 1.0))
}

fn to_screen(origin: (u16, u16), at: Vec2) -> (u16, u16) {
    let x = origin.0 as f32 + at.x.round().max(0.0);
    let y = origin.1 as f32 + at.y.round().max(0.0);
    (x as u16, y as u16)
}

fn cell_extent(grid: &Grid) -> (u16, u16) {
    let size = grid.cell_size();
    (size.x.round() as u16, size.y.round() as u16)
}

fn draw_grid(fb: &mut FrameBuffer, grid: &Grid, origin: (u16, u16)) {
    let style = grid.style;
    let (frame_w, frame_h) = grid.frame_size();
    let background = CellStyle::new(style.gridline, style.background);

    fb.fill_rect(origin.0, origin.1, frame_w, frame_h, ' ', background);
    if grid.outline_thickness > 0.0 {
        fb.draw_box(
            origin.0,
            origin.1,
            frame_w,
            frame_h,
            CellStyle::new(style.outline, style.background).bold(),
        );
    }

    if grid.gridline_thickness > 0.0 {
        let (cell_w, cell_h) = cell_extent(grid);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let (x, y) = to_screen(origin, grid.cell_position(col, row));
                fb.draw_box(x, y, cell_w, cell_h, background);
            }
        }
    }
}

fn draw_piece(fb: &mut FrameBuffer, grid: &Grid, origin: (u16, u16), col: usize, row: usize, piece: &Piece) {
    let Some(color) = piece_color(piece.value) else {
        return;
    };
    let fade = piece.fade_in();
    let bg = grid.style.background.blend(color, fade);
    let fg = grid.style.background.blend(Rgb::BLACK, fade);
    let style = CellStyle::new(fg, bg).bold();

    let (cell_w, cell_h) = cell_extent(grid);
    let (x, y) = to_screen(origin, piece.position(grid.cell_position(col, row)));
    fb.fill_rect(x, y, cell_w, cell_h, ' ', style);
    fb.put_str_centered(x, cell_w, y + cell_h / 2, piece.value.label(), style);
}
