//! The engine capability boundary.

use thiserror::Error;

use crate::types::GridSize;

/// Failures reported by an engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// `commit` was called with a move that is not the one most recently decided.
    #[error("commit called with a move that was not decided for this step")]
    UnexpectedMove,
    /// The session already ended; no further moves can be committed.
    #[error("engine session has finished")]
    Finished,
    /// Engine-internal failure.
    #[error("engine fault: {0}")]
    Fault(String),
}

/// An opaque simulation instance driven by the host.
///
/// The engine owns all game state. The host only reads the published frame and
/// passes [`Engine::Move`] values back unmodified.
///
/// Contract:
/// - `cols`/`rows` never change for the lifetime of the handle.
/// - `decide_next_move` is read-only; calling it repeatedly without a `commit`
///   returns the same answer.
/// - `frame_ptr`/`frame_len` describe `cols * rows` bytes inside `memory()`, valid
///   only until the next `&mut self` call.
pub trait Engine {
    /// Opaque decision value. The host never constructs or inspects it.
    type Move;

    fn cols(&self) -> u16;

    fn rows(&self) -> u16;

    /// The move for the upcoming transition, or `None` once the session has ended.
    fn decide_next_move(&self) -> Result<Option<Self::Move>, EngineError>;

    /// Apply the move returned by the last `decide_next_move`, advancing one step.
    ///
    /// May grow or relocate the memory region.
    fn commit(&mut self, mv: Self::Move) -> Result<(), EngineError>;

    fn score(&self) -> i64;

    /// Byte offset of the current frame inside [`Engine::memory`].
    fn frame_ptr(&self) -> usize;

    /// Length in bytes of the current frame.
    fn frame_len(&self) -> usize;

    /// The engine's raw memory region at its current base.
    fn memory(&self) -> &[u8];

    fn grid(&self) -> GridSize {
        GridSize::new(self.cols(), self.rows())
    }
}

impl<E: Engine + ?Sized> Engine for &mut E {
    type Move = E::Move;

    fn cols(&self) -> u16 {
        (**self).cols()
    }

    fn rows(&self) -> u16 {
        (**self).rows()
    }

    fn decide_next_move(&self) -> Result<Option<Self::Move>, EngineError> {
        (**self).decide_next_move()
    }

    fn commit(&mut self, mv: Self::Move) -> Result<(), EngineError> {
        (**self).commit(mv)
    }

    fn score(&self) -> i64 {
        (**self).score()
    }

    fn frame_ptr(&self) -> usize {
        (**self).frame_ptr()
    }

    fn frame_len(&self) -> usize {
        (**self).frame_len()
    }

    fn memory(&self) -> &[u8] {
        (**self).memory()
    }
}
