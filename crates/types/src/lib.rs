//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types shared by the engine boundary, the
//! decoder, the renderer and the frame driver. All types are pure data
//! structures with no external dependencies.
//!
//! # Cell Encoding
//!
//! The engine publishes one byte per grid cell, row-major:
//!
//! | Byte | Kind | Drawn as |
//! |------|------|----------|
//! | 0 | `Empty` | nothing |
//! | 1 | `Obstacle` | block |
//! | 2 | `BodyPrimary` | block |
//! | 3 | `BodySecondary` | block (same color as `BodyPrimary`) |
//! | 4 | `Target` | ball |
//!
//! Any other byte is a protocol anomaly and is reported by the decoder.
//!
//! # Layout Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_ANCHOR_COLS` | 3.0 | Score is drawn this many columns left of the right edge |
//! | `SCORE_ANCHOR_ROWS` | 1.75 | Score baseline, in row heights from the top |
//! | `DEFAULT_FRAME_DELAY_MS` | 1 | Pause between driver cycles |
//!
//! # Examples
//!
//! ```
//! use tui_arcade_types::{CellKind, GridSize};
//!
//! assert_eq!(CellKind::try_from(4), Ok(CellKind::Target));
//! assert_eq!(CellKind::try_from(9), Err(9));
//!
//! let grid = GridSize::new(4, 3);
//! assert_eq!(grid.cell_count(), 12);
//! assert_eq!(grid.position(5), (1, 1));
//! ```

/// Score anchor offset from the right edge, in column widths.
pub const SCORE_ANCHOR_COLS: f32 = 3.0;

/// Score anchor offset from the top edge, in row heights.
pub const SCORE_ANCHOR_ROWS: f32 = 1.75;

/// Default pause between two driver cycles (minimal; the driver only needs to yield).
pub const DEFAULT_FRAME_DELAY_MS: u64 = 1;

/// Semantic classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellKind {
    Empty = 0,
    Obstacle = 1,
    BodyPrimary = 2,
    BodySecondary = 3,
    Target = 4,
}

impl TryFrom<u8> for CellKind {
    /// The unrecognized byte.
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellKind::Empty),
            1 => Ok(CellKind::Obstacle),
            2 => Ok(CellKind::BodyPrimary),
            3 => Ok(CellKind::BodySecondary),
            4 => Ok(CellKind::Target),
            other => Err(other),
        }
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub cols: u16,
    pub rows: u16,
}

impl GridSize {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Number of cells (and frame bytes) in a full grid.
    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Row-major index to `(col, row)`.
    ///
    /// `cols` must be non-zero.
    #[inline]
    pub fn position(&self, index: usize) -> (u16, u16) {
        let cols = self.cols as usize;
        ((index % cols) as u16, (index / cols) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_kind_roundtrips_known_bytes() {
        for b in 0u8..=4 {
            let kind = CellKind::try_from(b).unwrap();
            assert_eq!(kind as u8, b);
        }
    }

    #[test]
    fn cell_kind_rejects_unknown_bytes() {
        assert_eq!(CellKind::try_from(5), Err(5));
        assert_eq!(CellKind::try_from(255), Err(255));
    }

    #[test]
    fn grid_position_is_row_major() {
        let grid = GridSize::new(4, 3);
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(3), (3, 0));
        assert_eq!(grid.position(5), (1, 1));
        assert_eq!(grid.position(11), (3, 2));
    }

    #[test]
    fn layout_constants_are_fixed() {
        assert_eq!(SCORE_ANCHOR_COLS, 3.0);
        assert_eq!(SCORE_ANCHOR_ROWS, 1.75);
        assert_eq!(DEFAULT_FRAME_DELAY_MS, 1);
    }
}
