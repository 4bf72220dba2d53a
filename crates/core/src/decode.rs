//! Cell decoder: raw frame bytes to `(col, row, kind)` triples.

use std::iter::FusedIterator;

use thiserror::Error;

use crate::types::{CellKind, GridSize};

/// One successfully decoded cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedCell {
    pub col: u16,
    pub row: u16,
    pub kind: CellKind,
}

/// A byte outside the known cell encoding.
///
/// Usually means the host and engine disagree on the frame format.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
#[error("unknown cell byte {byte} at index {index} (col {col}, row {row})")]
pub struct DecodeError {
    pub index: usize,
    pub col: u16,
    pub row: u16,
    pub byte: u8,
}

/// Lazy, allocation-free iterator over a row-major frame.
///
/// Unknown bytes produce an `Err` item and decoding continues with the next index.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    grid: GridSize,
    index: usize,
}

impl<'a> Decoder<'a> {
    /// Decode at most `grid.cell_count()` bytes; an empty grid decodes to nothing.
    pub fn new(bytes: &'a [u8], grid: GridSize) -> Self {
        let len = if grid.is_empty() {
            0
        } else {
            bytes.len().min(grid.cell_count())
        };
        Self {
            bytes: &bytes[..len],
            grid,
            index: 0,
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<DecodedCell, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.bytes.get(self.index)?;
        let index = self.index;
        self.index += 1;

        let (col, row) = self.grid.position(index);
        Some(match CellKind::try_from(byte) {
            Ok(kind) => Ok(DecodedCell { col, row, kind }),
            Err(byte) => Err(DecodeError {
                index,
                col,
                row,
                byte,
            }),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.bytes.len() - self.index;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Decoder<'_> {}

impl FusedIterator for Decoder<'_> {}

/// Decode a row-major byte frame `cols` cells wide.
///
/// Rows are addressed as `u16`, so bytes past row `u16::MAX - 1` are not decoded.
pub fn decode(bytes: &[u8], cols: u16) -> Decoder<'_> {
    let rows = match cols {
        0 => 0,
        cols => bytes.len().div_ceil(cols as usize).min(u16::MAX as usize) as u16,
    };
    Decoder::new(bytes, GridSize::new(cols, rows))
}
