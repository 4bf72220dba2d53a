//! Recorded session format.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GridSize;

#[derive(Debug, Error)]
pub enum TapeError {
    #[error("failed to read tape: {0}")]
    Io(#[from] io::Error),
    #[error("malformed tape: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tape grid must be non-empty, got {cols}x{rows}")]
    EmptyGrid { cols: u16, rows: u16 },
    #[error("tape has no frames")]
    NoFrames,
    #[error("frame {frame} has {len} cells, expected {expected}")]
    FrameLength {
        frame: usize,
        len: usize,
        expected: usize,
    },
    #[error("frame {frame} ends the session but is followed by more frames")]
    EarlyEnd { frame: usize },
}

/// One recorded step: the frame the engine published and the move it then decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeFrame {
    pub score: i64,
    pub cells: Vec<u8>,
    #[serde(default)]
    pub next_move: Option<i64>,
}

/// A validated recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTape")]
pub struct Tape {
    cols: u16,
    rows: u16,
    frames: Vec<TapeFrame>,
}

#[derive(Deserialize)]
struct RawTape {
    cols: u16,
    rows: u16,
    frames: Vec<TapeFrame>,
}

impl TryFrom<RawTape> for Tape {
    type Error = TapeError;

    fn try_from(raw: RawTape) -> Result<Self, Self::Error> {
        Tape::new(raw.cols, raw.rows, raw.frames)
    }
}

impl Tape {
    /// Validate and build a tape.
    ///
    /// Cell bytes are not checked against the known encoding; anomalies are the
    /// decoder's concern.
    pub fn new(cols: u16, rows: u16, frames: Vec<TapeFrame>) -> Result<Self, TapeError> {
        let grid = GridSize::new(cols, rows);
        if grid.is_empty() {
            return Err(TapeError::EmptyGrid { cols, rows });
        }
        if frames.is_empty() {
            return Err(TapeError::NoFrames);
        }

        let expected = grid.cell_count();
        let last = frames.len() - 1;
        for (i, frame) in frames.iter().enumerate() {
            if frame.cells.len() != expected {
                return Err(TapeError::FrameLength {
                    frame: i,
                    len: frame.cells.len(),
                    expected,
                });
            }
            if frame.next_move.is_none() && i != last {
                return Err(TapeError::EarlyEnd { frame: i });
            }
        }

        Ok(Self { cols, rows, frames })
    }

    pub fn from_json_str(s: &str) -> Result<Self, TapeError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TapeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TapeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.cols, self.rows)
    }

    pub fn frames(&self) -> &[TapeFrame] {
        &self.frames
    }

    /// Number of recorded frames; at least one after validation.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
