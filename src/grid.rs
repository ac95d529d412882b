//! The uniform square grid: line placement and cell/pixel conversion.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::color::Rgb;
use crate::consts::{DEFAULT_GRID_STEP, MAX_GRID_LINES};
use crate::geom::{Point, Rect};

/// Integer (column, row) position of a token on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by whole cells.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy) }
    }
}

/// Errors from converting between pixels and cells.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The step is zero, negative, or not finite, so no cell has an extent.
    #[error("grid step {step} is not a positive finite number")]
    DegenerateStep { step: f64 },
}

/// Grid parameters. None of them are validated on assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Pixel edge length of one cell; also the rendered token size.
    pub step: f64,
    /// Horizontal pixel offset of the line at column 0.
    pub h_offset: i32,
    /// Vertical pixel offset of the line at row 0.
    pub v_offset: i32,
    /// Line color.
    pub color: Rgb,
}

impl Default for Grid {
    fn default() -> Self {
        Self { step: DEFAULT_GRID_STEP, h_offset: 0, v_offset: 0, color: Rgb::WHITE }
    }
}

/// Line positions for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLines {
    /// y coordinates of horizontal lines.
    pub horizontal: Vec<f64>,
    /// x coordinates of vertical lines.
    pub vertical: Vec<f64>,
}

impl Grid {
    /// Whether the step describes real cells.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.step.is_finite() && self.step > 0.0)
    }

    /// Top-left pixel of `cell`.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Point {
        Point::new(
            f64::from(cell.x) * self.step + f64::from(self.h_offset),
            f64::from(cell.y) * self.step + f64::from(self.v_offset),
        )
    }

    /// Pixel rectangle covered by `cell`: always `step` by `step`.
    #[must_use]
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let o = self.cell_origin(cell);
        Rect::new(o.x, o.y, self.step, self.step)
    }

    /// Cell containing pixel `pt`, flooring so that pixels left of or above
    /// the offset origin land in negative cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DegenerateStep`] when the step is not a positive finite number.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_at(&self, pt: Point) -> Result<Cell, GridError> {
        if self.is_degenerate() {
            return Err(GridError::DegenerateStep { step: self.step });
        }
        let cx = ((pt.x - f64::from(self.h_offset)) / self.step).floor();
        let cy = ((pt.y - f64::from(self.v_offset)) / self.step).floor();
        // `as` saturates on overflow.
        Ok(Cell::new(cx as i32, cy as i32))
    }

    /// Lines crossing `visible`, each spanning its full width or height.
    ///
    /// A degenerate step yields no lines. The count per axis is capped at
    /// [`MAX_GRID_LINES`] so a tiny positive step still terminates promptly.
    #[must_use]
    pub fn lines(&self, visible: Rect) -> GridLines {
        if self.is_degenerate() || visible.is_empty() {
            return GridLines::default();
        }
        GridLines {
            horizontal: axis_lines(f64::from(self.v_offset), self.step, visible.y, visible.bottom()),
            vertical: axis_lines(f64::from(self.h_offset), self.step, visible.x, visible.right()),
        }
    }
}

/// Every `offset + k * step` in `[start, end]`.
fn axis_lines(offset: f64, step: f64, start: f64, end: f64) -> Vec<f64> {
    let first = ((start - offset) / step).ceil();
    let mut out = Vec::new();
    let mut k = first;
    loop {
        let at = offset + k * step;
        if at > end || out.len() >= MAX_GRID_LINES {
            break;
        }
        out.push(at);
        k += 1.0;
    }
    out
}
