//! Grid geometry - maps `(col, row)` cells to positions in terminal cell units
//!
//! The grid is laid out in its own coordinate space starting at the
//! destination rectangle's origin; the renderer offsets that space to center
//! it in the viewport. Pure functions of the configuration, no I/O.

use crate::types::{
    Rect, Rgb, Vec2, CELL_HEIGHT, CELL_WIDTH, GRIDLINE_THICKNESS, GRID_COLS, GRID_ROWS,
    OUTLINE_THICKNESS,
};

/// Colors used when drawing the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStyle {
    pub background: Rgb,
    pub outline: Rgb,
    pub gridline: Rgb,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            background: Rgb::new(130, 130, 130),
            outline: Rgb::new(0, 0, 0),
            gridline: Rgb::new(80, 80, 80),
        }
    }
}

/// Grid configuration, immutable once a session is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub destination: Rect,
    pub cols: usize,
    pub rows: usize,
    pub outline_thickness: f32,
    pub gridline_thickness: f32,
    pub style: GridStyle,
}

impl Grid {
    /// Grid whose cells are exactly `cell_w x cell_h` with the given outline.
    pub fn with_cell_size(cols: usize, rows: usize, cell_w: f32, cell_h: f32, outline: f32) -> Self {
        Self {
            destination: Rect::new(
                0.0,
                0.0,
                cols as f32 * cell_w + outline * 2.0,
                rows as f32 * cell_h + outline * 2.0,
            ),
            cols,
            rows,
            outline_thickness: outline,
            gridline_thickness: GRIDLINE_THICKNESS as f32,
            style: GridStyle::default(),
        }
    }

    /// Size of one cell: the destination minus the outline, split evenly.
    pub fn cell_size(&self) -> Vec2 {
        let inner_w = self.destination.width - self.outline_thickness * 2.0;
        let inner_h = self.destination.height - self.outline_thickness * 2.0;
        Vec2::new(inner_w / self.cols as f32, inner_h / self.rows as f32)
    }

    /// Top-left corner of the cell at `(col, row)`.
    pub fn cell_position(&self, col: usize, row: usize) -> Vec2 {
        let size = self.cell_size();
        Vec2::new(
            self.destination.x + self.outline_thickness + col as f32 * size.x,
            self.destination.y + self.outline_thickness + row as f32 * size.y,
        )
    }

    /// Top-left corner of the cell at row-major `index`.
    pub fn cell_position_index(&self, index: usize) -> Vec2 {
        self.cell_position(index % self.cols, index / self.cols)
    }

    /// Whole grid including the outline, rounded up to whole terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            self.destination.width.ceil() as u16,
            self.destination.height.ceil() as u16,
        )
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::with_cell_size(
            GRID_COLS,
            GRID_ROWS,
            CELL_WIDTH as f32,
            CELL_HEIGHT as f32,
            OUTLINE_THICKNESS as f32,
        )
    }
}
