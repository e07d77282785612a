//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 4x4 grid addressed by `(col, row)`:
//!
//! - **Columns**: 4 (indexed 0-3, left to right)
//! - **Rows**: 4 (indexed 0-3, top to bottom)
//!
//! # Timing Constants
//!
//! Timing values are in seconds (frame deltas are `f32` seconds):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PIECE_MOVE_TIME` | 0.2 | Slide/merge interpolation |
//! | `PIECE_SPAWN_TIME` | 0.15 | Spawn fade-in |
//! | `STATE_TRANSITION_TIME` | 1.25 | Each half of a screen crossfade |
//! | `STATE_DELAY_TIME` | 2.0 | Wait before a scheduled screen change starts |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{PieceValue, Direction, GRID_COLS, GRID_ROWS};
//!
//! // Tile values double one step at a time and stop at 2048.
//! assert_eq!(PieceValue::Two.next(), Some(PieceValue::Four));
//! assert_eq!(PieceValue::TwentyFortyEight.next(), None);
//! assert_eq!(PieceValue::TenTwentyFour.label(), "1024");
//!
//! // Directions are unit vectors on one axis.
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//!
//! assert_eq!(GRID_COLS, 4);
//! assert_eq!(GRID_ROWS, 4);
//! ```

use std::ops::{Add, Mul, Sub};

/// Grid width in cells (4 columns)
pub const GRID_COLS: usize = 4;

/// Grid height in cells (4 rows)
pub const GRID_ROWS: usize = 4;

/// Total number of cells on the grid
pub const GRID_SIZE: usize = GRID_COLS * GRID_ROWS;

/// Duration of a slide or merge interpolation (seconds)
pub const PIECE_MOVE_TIME: f32 = 0.2;

/// Duration of the spawn fade-in (seconds)
pub const PIECE_SPAWN_TIME: f32 = 0.15;

/// Duration of each half (fade-out, fade-in) of a screen transition (seconds)
pub const STATE_TRANSITION_TIME: f32 = 1.25;

/// Wait before a delayed screen change begins its transition (seconds)
pub const STATE_DELAY_TIME: f32 = 2.0;

/// Target frame rate of the application loop
pub const TARGET_FPS: u32 = 60;

/// Width of one grid cell in terminal columns
pub const CELL_WIDTH: u16 = 8;

/// Height of one grid cell in terminal rows
pub const CELL_HEIGHT: u16 = 3;

/// Thickness of the grid outline in terminal cells
pub const OUTLINE_THICKNESS: u16 = 1;

/// Thickness of the lines drawn around each grid cell
pub const GRIDLINE_THICKNESS: u16 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(PIECE_MOVE_TIME, 0.2);
        assert_eq!(PIECE_SPAWN_TIME, 0.15);
        assert_eq!(STATE_TRANSITION_TIME, 1.25);
        assert_eq!(STATE_DELAY_TIME, 2.0);
        assert_eq!(GRID_SIZE, 16);
    }

    #[test]
    fn piece_value_ordering_follows_doubling() {
        assert!(PieceValue::Empty < PieceValue::Two);
        assert!(PieceValue::Two < PieceValue::TwentyFortyEight);
        assert_eq!(PieceValue::Empty.next(), None);

        let mut value = PieceValue::Two;
        let mut expected = 2;
        loop {
            assert_eq!(value.number(), expected);
            assert_eq!(value.label(), expected.to_string());
            match value.next() {
                Some(next) => value = next,
                None => break,
            }
            expected *= 2;
        }
        assert_eq!(value, PieceValue::MAX);
        assert_eq!(expected, 2048);
    }

    #[test]
    fn frame_input_direction_vector() {
        let mut input = FrameInput::default();
        assert_eq!(input.direction(), (0, 0));

        input.press(GameKey::Right);
        assert_eq!(input.direction(), (1, 0));

        input.press(GameKey::Left);
        assert_eq!(input.direction(), (0, 0));

        input.clear();
        input.press(GameKey::Up);
        assert!(input.pressed(GameKey::Up));
        assert!(!input.pressed(GameKey::Down));
        assert_eq!(input.direction(), (0, -1));
    }

    #[test]
    fn vec2_lerp_endpoints() {
        let a = Vec2::new(2.0, 4.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(6.0, 2.0));
    }

    #[test]
    fn rgb_blend_is_clamped() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.blend(white, 0.0), black);
        assert_eq!(black.blend(white, 1.0), white);
        assert_eq!(black.blend(white, 2.0), white);
        assert_eq!(black.blend(white, 0.5), Rgb::new(128, 128, 128));
    }
}

/// Value of a tile on the grid
///
/// Each successor doubles the represented number: `Two` is 2¹ and
/// `TwentyFortyEight` is 2¹¹. `Empty` marks a free cell and sorts below
/// every tile, so the derived ordering answers "highest piece" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PieceValue {
    #[default]
    Empty,
    Two,
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
    SixtyFour,
    OneTwentyEight,
    TwoFiftySix,
    FiveTwelve,
    TenTwentyFour,
    TwentyFortyEight,
}

impl PieceValue {
    /// Highest reachable tile; producing it wins the game.
    pub const MAX: PieceValue = PieceValue::TwentyFortyEight;

    pub fn is_empty(self) -> bool {
        self == PieceValue::Empty
    }

    /// The doubled value, or `None` for `Empty` and for [`PieceValue::MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::PieceValue;
    ///
    /// assert_eq!(PieceValue::Eight.next(), Some(PieceValue::Sixteen));
    /// assert_eq!(PieceValue::Empty.next(), None);
    /// ```
    pub fn next(self) -> Option<PieceValue> {
        use PieceValue::*;
        match self {
            Empty => None,
            Two => Some(Four),
            Four => Some(Eight),
            Eight => Some(Sixteen),
            Sixteen => Some(ThirtyTwo),
            ThirtyTwo => Some(SixtyFour),
            SixtyFour => Some(OneTwentyEight),
            OneTwentyEight => Some(TwoFiftySix),
            TwoFiftySix => Some(FiveTwelve),
            FiveTwelve => Some(TenTwentyFour),
            TenTwentyFour => Some(TwentyFortyEight),
            TwentyFortyEight => None,
        }
    }

    /// Exponent of the represented number (0 for `Empty`, 1..=11 otherwise).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Represented number (0 for `Empty`).
    pub fn number(self) -> u32 {
        match self {
            PieceValue::Empty => 0,
            v => 1 << v.rank(),
        }
    }

    /// Display label drawn on the tile.
    pub fn label(self) -> &'static str {
        use PieceValue::*;
        match self {
            Empty => "",
            Two => "2",
            Four => "4",
            Eight => "8",
            Sixteen => "16",
            ThirtyTwo => "32",
            SixtyFour => "64",
            OneTwentyEight => "128",
            TwoFiftySix => "256",
            FiveTwelve => "512",
            TenTwentyFour => "1024",
            TwentyFortyEight => "2048",
        }
    }
}

/// Cardinal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)`; y grows downward.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Direction on the x axis for a signed component (`None` for zero).
    pub fn from_dx(dx: i8) -> Option<Self> {
        match dx.signum() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Direction on the y axis for a signed component (`None` for zero).
    pub fn from_dy(dy: i8) -> Option<Self> {
        match dy.signum() {
            1 => Some(Direction::Down),
            -1 => Some(Direction::Up),
            _ => None,
        }
    }
}

/// Screens of the presentation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Start,
    Gameplay,
    Loss,
    Win,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Gameplay => "gameplay",
            Screen::Loss => "loss",
            Screen::Win => "win",
        }
    }
}

/// How a freshly merged tile behaves for the rest of the same move
///
/// - **Cascading**: the merged tile stays eligible, so a later equal tile in
///   the same line can merge into it again (`[2, 2, 4, _]` left → `[8, _, _, _]`).
/// - **SinglePerMove**: a tile merges at most once per move, as in classic
///   2048 (`[2, 2, 4, _]` left → `[4, 4, _, _]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergePolicy {
    #[default]
    Cascading,
    SinglePerMove,
}

impl MergePolicy {
    /// Parse from string (case-insensitive): "cascading" | "single"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cascading" | "cascade" => Some(MergePolicy::Cascading),
            "single" | "single-per-move" => Some(MergePolicy::SinglePerMove),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MergePolicy::Cascading => "cascading",
            MergePolicy::SinglePerMove => "single",
        }
    }
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    /// Leaves the start screen
    Start,
    /// Plays again from the win/loss screens
    Restart,
}

impl GameKey {
    const COUNT: usize = 6;

    fn slot(self) -> usize {
        match self {
            GameKey::Up => 0,
            GameKey::Down => 1,
            GameKey::Left => 2,
            GameKey::Right => 3,
            GameKey::Start => 4,
            GameKey::Restart => 5,
        }
    }
}

/// Keys pressed since the previous frame (edge-triggered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pressed: [bool; GameKey::COUNT],
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: GameKey) {
        self.pressed[key.slot()] = true;
    }

    pub fn pressed(&self, key: GameKey) -> bool {
        self.pressed[key.slot()]
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.iter().all(|p| !p)
    }

    pub fn clear(&mut self) {
        self.pressed = [false; GameKey::COUNT];
    }

    /// Movement vector `(right - left, down - up)`.
    pub fn direction(&self) -> (i8, i8) {
        let axis = |pos: GameKey, neg: GameKey| self.pressed(pos) as i8 - self.pressed(neg) as i8;
        (
            axis(GameKey::Right, GameKey::Left),
            axis(GameKey::Down, GameKey::Up),
        )
    }
}

/// 2D float coordinate in terminal cell units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation; `t` is not clamped.
    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        self + (to - self) * t
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in terminal cell units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mix toward `other` by `amount` (clamped to `0.0..=1.0`).
    pub fn blend(self, other: Rgb, amount: f32) -> Rgb {
        let t = amount.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Convert from hue (degrees), saturation and value (both `0.0..=1.0`).
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Rgb {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = value - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}
