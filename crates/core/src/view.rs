//! Per-cycle read-only window into an engine's frame memory.

use thiserror::Error;

use crate::decode::Decoder;
use crate::engine::Engine;
use crate::types::GridSize;

/// Reasons a frame view cannot be built from the engine's advertised layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("frame length {len} does not match grid {cols}x{rows}")]
    LengthMismatch { len: usize, cols: u16, rows: u16 },
    #[error("frame [{ptr}, {ptr}+{len}) lies outside memory region of {region} bytes")]
    OutOfRegion { ptr: usize, len: usize, region: usize },
    #[error("grid has zero columns or rows")]
    EmptyGrid,
}

/// One decoded-on-demand snapshot of the grid plus score.
///
/// A `FrameView` borrows the engine it was acquired from. Because
/// [`Engine::commit`] needs `&mut E`, no view can survive a commit.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    grid: GridSize,
    cells: &'a [u8],
    score: i64,
}

impl<'a> FrameView<'a> {
    /// Resolve the engine's current region base, pointer and length into a fresh view.
    ///
    /// Nothing is cached between calls: every field is re-read from the engine.
    pub fn acquire<E>(engine: &'a E) -> Result<Self, ViewError>
    where
        E: Engine + ?Sized,
    {
        let grid = engine.grid();
        if grid.is_empty() {
            return Err(ViewError::EmptyGrid);
        }

        let ptr = engine.frame_ptr();
        let len = engine.frame_len();
        if len != grid.cell_count() {
            return Err(ViewError::LengthMismatch {
                len,
                cols: grid.cols,
                rows: grid.rows,
            });
        }

        let region = engine.memory();
        let cells = ptr
            .checked_add(len)
            .and_then(|end| region.get(ptr..end))
            .ok_or(ViewError::OutOfRegion {
                ptr,
                len,
                region: region.len(),
            })?;

        Ok(Self {
            grid,
            cells,
            score: engine.score(),
        })
    }

    /// Build a view directly over a byte slice (tests, benches, offline decoding).
    pub fn from_parts(grid: GridSize, cells: &'a [u8], score: i64) -> Result<Self, ViewError> {
        if grid.is_empty() {
            return Err(ViewError::EmptyGrid);
        }
        if cells.len() != grid.cell_count() {
            return Err(ViewError::LengthMismatch {
                len: cells.len(),
                cols: grid.cols,
                rows: grid.rows,
            });
        }
        Ok(Self { grid, cells, score })
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn cols(&self) -> u16 {
        self.grid.cols
    }

    pub fn rows(&self) -> u16 {
        self.grid.rows
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.cells
    }

    /// Lazily decode the cells in index order.
    pub fn cells(&self) -> Decoder<'a> {
        Decoder::new(self.cells, self.grid)
    }
}
