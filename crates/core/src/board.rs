//! Board module - manages the tile grid
//!
//! The board is a 4x4 grid where each cell holds a [`Piece`] (possibly empty).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..3 (left to right), row ranges 0..3 (top to bottom)

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{
    Direction, MergePolicy, PieceValue, Vec2, GRID_COLS, GRID_ROWS, GRID_SIZE, PIECE_MOVE_TIME,
    PIECE_SPAWN_TIME,
};

/// Longest line a shift can sweep
const MAX_LINE: usize = if GRID_COLS > GRID_ROWS {
    GRID_COLS
} else {
    GRID_ROWS
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("could not find an empty cell to spawn a piece in ({cells} cells probed)")]
    NoEmptyCell { cells: usize },
}

/// A single tile and its animation state
///
/// A piece is idle (`animation_time <= 0`), spawning (fading in), or moving
/// (interpolating from `start_position` to `end_position`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub value: PieceValue,
    pub start_position: Vec2,
    pub end_position: Vec2,
    /// Seconds of animation remaining
    pub animation_time: f32,
    pub is_spawning: bool,
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        value: PieceValue::Empty,
        start_position: Vec2::ZERO,
        end_position: Vec2::ZERO,
        animation_time: 0.0,
        is_spawning: false,
    };

    /// Idle piece with the given value
    pub fn idle(value: PieceValue) -> Self {
        Self {
            value,
            ..Self::EMPTY
        }
    }

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_from_spawn(&mut self, value: PieceValue) {
        self.value = value;
        self.animation_time = PIECE_SPAWN_TIME;
        self.is_spawning = true;
    }

    pub fn set_from_move(&mut self, value: PieceValue, from: Vec2, to: Vec2) {
        self.value = value;
        self.start_position = from;
        self.end_position = to;
        self.animation_time = PIECE_MOVE_TIME;
        self.is_spawning = false;
    }

    /// Advance the animation clock.
    pub fn tick(&mut self, dt: f32) {
        if self.animation_time > 0.0 {
            self.animation_time = (self.animation_time - dt).max(0.0);
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.is_empty() && self.animation_time > 0.0
    }

    /// Opacity of the spawn fade-in (1.0 once settled).
    pub fn fade_in(&self) -> f32 {
        if self.is_spawning && self.animation_time > 0.0 {
            ((PIECE_SPAWN_TIME - self.animation_time) / PIECE_SPAWN_TIME).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Where to draw the piece; `rest` is its own cell position.
    pub fn position(&self, rest: Vec2) -> Vec2 {
        if !self.is_spawning && self.animation_time > 0.0 {
            let t = (PIECE_MOVE_TIME - self.animation_time) / PIECE_MOVE_TIME;
            self.start_position.lerp(self.end_position, t)
        } else {
            rest
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Result of sweeping the board in one or two directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftOutcome {
    /// Any piece moved or merged
    pub changed: bool,
    /// A merge produced [`PieceValue::MAX`]
    pub reached_max: bool,
}

impl ShiftOutcome {
    fn combine(self, other: ShiftOutcome) -> ShiftOutcome {
        ShiftOutcome {
            changed: self.changed || other.changed,
            reached_max: self.reached_max || other.reached_max,
        }
    }
}

/// The game board - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of pieces, row-major order (row * COLS + col)
    cells: [Piece; GRID_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Piece::EMPTY; GRID_SIZE],
        }
    }

    /// Build an idle board from rows of values (`rows[row][col]`)
    pub fn from_rows(rows: [[PieceValue; GRID_COLS]; GRID_ROWS]) -> Self {
        let mut board = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                board.cells[Self::index(col, row)] = Piece::idle(*value);
            }
        }
        board
    }

    #[inline(always)]
    fn index(col: usize, row: usize) -> usize {
        row * GRID_COLS + col
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    /// Piece at `(col, row)`, `None` if out of bounds
    pub fn piece(&self, col: usize, row: usize) -> Option<&Piece> {
        if col >= GRID_COLS || row >= GRID_ROWS {
            return None;
        }
        Some(&self.cells[Self::index(col, row)])
    }

    /// Value at `(col, row)`; out of bounds reads as empty
    pub fn value(&self, col: usize, row: usize) -> PieceValue {
        self.piece(col, row)
            .map_or(PieceValue::Empty, |piece| piece.value)
    }

    /// Place an idle piece. Returns false if out of bounds
    pub fn set_value(&mut self, col: usize, row: usize, value: PieceValue) -> bool {
        if col >= GRID_COLS || row >= GRID_ROWS {
            return false;
        }
        self.cells[Self::index(col, row)] = Piece::idle(value);
        true
    }

    pub fn row_values(&self, row: usize) -> [PieceValue; GRID_COLS] {
        std::array::from_fn(|col| self.value(col, row))
    }

    pub fn column_values(&self, col: usize) -> [PieceValue; GRID_ROWS] {
        std::array::from_fn(|row| self.value(col, row))
    }

    /// Iterate `(col, row, piece)` in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, &Piece)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, piece)| (i % GRID_COLS, i / GRID_COLS, piece))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|piece| !piece.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|piece| !piece.is_empty())
    }

    pub fn is_animating(&self) -> bool {
        self.cells.iter().any(Piece::is_animating)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [Piece::EMPTY; GRID_SIZE];
    }

    pub fn tick_animations(&mut self, dt: f32) {
        for piece in self.cells.iter_mut().filter(|piece| !piece.is_empty()) {
            piece.tick(dt);
        }
    }

    /// Highest value on the board (`Empty` when the board is empty)
    pub fn highest_value(&self) -> PieceValue {
        self.cells
            .iter()
            .map(|piece| piece.value)
            .max()
            .unwrap_or(PieceValue::Empty)
    }

    /// Drop a new tile into a free cell.
    ///
    /// Probing starts at a random cell and walks forward (wrapping) until a
    /// free cell turns up. The tile is a Four one time in four, else a Two.
    /// Returns the `(col, row)` that was filled.
    pub fn spawn(&mut self, rng: &mut SimpleRng) -> Result<(usize, usize), BoardError> {
        let mut index = rng.next_range(GRID_SIZE as u32) as usize;

        for _ in 0..GRID_SIZE {
            if self.cells[index].is_empty() {
                let value = if rng.chance(1, 4) {
                    PieceValue::Four
                } else {
                    PieceValue::Two
                };
                self.cells[index].set_from_spawn(value);
                return Ok((index % GRID_COLS, index / GRID_COLS));
            }
            index = (index + 1) % GRID_SIZE;
        }

        Err(BoardError::NoEmptyCell { cells: GRID_SIZE })
    }

    /// No free cell and no equal neighbours: nothing can move.
    ///
    /// Only right and bottom neighbours are compared; equality is symmetric so
    /// that covers every adjacent pair once.
    pub fn is_stuck(&self) -> bool {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let value = self.value(col, row);
                if value.is_empty() {
                    return false;
                }
                if col + 1 < GRID_COLS && self.value(col + 1, row) == value {
                    return false;
                }
                if row + 1 < GRID_ROWS && self.value(col, row + 1) == value {
                    return false;
                }
            }
        }
        true
    }

    /// Apply a movement vector: the x component first, then the y component.
    ///
    /// `(0, 0)` does nothing and reports no change.
    pub fn shift_vector(
        &mut self,
        dx: i8,
        dy: i8,
        grid: &Grid,
        policy: MergePolicy,
    ) -> ShiftOutcome {
        let mut outcome = ShiftOutcome::default();
        if let Some(direction) = Direction::from_dx(dx) {
            outcome = outcome.combine(self.shift(direction, grid, policy));
        }
        if let Some(direction) = Direction::from_dy(dy) {
            outcome = outcome.combine(self.shift(direction, grid, policy));
        }
        outcome
    }

    /// Slide every tile toward `direction`, merging equal neighbours.
    ///
    /// Each line is swept starting at the destination edge so tiles compact in
    /// order. A tile slides over free cells until it meets another tile; equal
    /// values merge into that tile (the source cell empties), otherwise the
    /// tile stops next to it. Every resolved tile gets a move animation, a
    /// zero-length one if it stayed put.
    ///
    /// Under [`MergePolicy::Cascading`] a freshly merged tile can absorb a
    /// later equal tile in the same sweep; [`MergePolicy::SinglePerMove`]
    /// allows one merge per destination.
    pub fn shift(&mut self, direction: Direction, grid: &Grid, policy: MergePolicy) -> ShiftOutcome {
        let mut outcome = ShiftOutcome::default();
        let mut merged = [false; GRID_SIZE];

        let line_count = if direction.is_horizontal() {
            GRID_ROWS
        } else {
            GRID_COLS
        };

        for line in 0..line_count {
            let cells = line_cells(direction, line);

            'cells: for i in 0..cells.len() {
                let (col, row) = cells[i];
                let source = Self::index(col, row);
                let value = self.cells[source].value;
                if value.is_empty() {
                    continue;
                }
                let from = grid.cell_position(col, row);

                let mut slot = i;
                while slot > 0 {
                    let (next_col, next_row) = cells[slot - 1];
                    let target = Self::index(next_col, next_row);
                    let next = self.cells[target].value;

                    if next.is_empty() {
                        slot -= 1;
                        continue;
                    }

                    let may_merge = policy == MergePolicy::Cascading || !merged[target];
                    if next == value && may_merge {
                        if let Some(doubled) = value.next() {
                            self.cells[source].reset();
                            self.cells[target].set_from_move(
                                doubled,
                                from,
                                grid.cell_position(next_col, next_row),
                            );
                            merged[target] = true;
                            outcome.changed = true;
                            outcome.reached_max |= doubled == PieceValue::MAX;
                            continue 'cells;
                        }
                    }
                    break;
                }

                let (dest_col, dest_row) = cells[slot];
                if slot != i {
                    outcome.changed = true;
                }
                self.cells[source].reset();
                self.cells[Self::index(dest_col, dest_row)].set_from_move(
                    value,
                    from,
                    grid.cell_position(dest_col, dest_row),
                );
            }
        }

        outcome
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Cells of one line ordered from the edge `direction` points at.
fn line_cells(direction: Direction, line: usize) -> ArrayVec<(usize, usize), MAX_LINE> {
    match direction {
        Direction::Left => (0..GRID_COLS).map(|col| (col, line)).collect(),
        Direction::Right => (0..GRID_COLS).rev().map(|col| (col, line)).collect(),
        Direction::Up => (0..GRID_ROWS).map(|row| (line, row)).collect(),
        Direction::Down => (0..GRID_ROWS).rev().map(|row| (line, row)).collect(),
    }
}
