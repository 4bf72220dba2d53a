//! `TapeEngine`: replays a recorded session through the engine boundary.
//!
//! Frames are published through a growable byte region. Each commit appends the
//! next frame to the region, which may reallocate it, and moves `frame_ptr`.
//! Once the region passes its limit it is compacted back to offset 0. Either way,
//! any slice the host obtained before the commit no longer describes the frame.

use tracing::debug;

use tui_arcade_core::{Engine, EngineError};

use crate::tape::Tape;

/// Region size after which the engine compacts its memory.
pub const DEFAULT_REGION_LIMIT: usize = 64 * 1024;

/// Move token handed out by [`TapeEngine::decide_next_move`].
///
/// Carries the step it was decided for, so a stale token is rejected.
#[derive(Debug, PartialEq, Eq)]
pub struct TapeMove {
    step: usize,
    value: i64,
}

pub struct TapeEngine {
    tape: Tape,
    step: usize,
    memory: Vec<u8>,
    frame_ptr: usize,
    region_limit: usize,
}

impl TapeEngine {
    pub fn new(tape: Tape) -> Self {
        Self::with_region_limit(tape, DEFAULT_REGION_LIMIT)
    }

    /// Like [`TapeEngine::new`] with a custom compaction threshold.
    pub fn with_region_limit(tape: Tape, region_limit: usize) -> Self {
        let mut engine = Self {
            tape,
            step: 0,
            memory: Vec::new(),
            frame_ptr: 0,
            region_limit,
        };
        engine.publish_current();
        engine
    }

    /// Index of the frame currently published.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.tape.frames()[self.step].next_move.is_none()
    }

    fn publish_current(&mut self) {
        let frame_len = self.tape.grid().cell_count();
        if !self.memory.is_empty() && self.memory.len() + frame_len > self.region_limit {
            debug!(
                region = self.memory.len(),
                limit = self.region_limit,
                "compacting frame region"
            );
            self.memory.clear();
        }

        let before = self.memory.as_ptr();
        self.frame_ptr = self.memory.len();
        self.memory
            .extend_from_slice(&self.tape.frames()[self.step].cells);
        if before != self.memory.as_ptr() {
            debug!(capacity = self.memory.capacity(), "frame region relocated");
        }
    }
}

impl Engine for TapeEngine {
    type Move = TapeMove;

    fn cols(&self) -> u16 {
        self.tape.grid().cols
    }

    fn rows(&self) -> u16 {
        self.tape.grid().rows
    }

    fn decide_next_move(&self) -> Result<Option<TapeMove>, EngineError> {
        Ok(self.tape.frames()[self.step]
            .next_move
            .map(|value| TapeMove {
                step: self.step,
                value,
            }))
    }

    fn commit(&mut self, mv: TapeMove) -> Result<(), EngineError> {
        let expected = self.tape.frames()[self.step]
            .next_move
            .ok_or(EngineError::Finished)?;
        if mv.step != self.step || mv.value != expected {
            return Err(EngineError::UnexpectedMove);
        }

        // Tape validation guarantees a frame follows every non-terminal one.
        self.step += 1;
        self.publish_current();
        Ok(())
    }

    fn score(&self) -> i64 {
        self.tape.frames()[self.step].score
    }

    fn frame_ptr(&self) -> usize {
        self.frame_ptr
    }

    fn frame_len(&self) -> usize {
        self.tape.grid().cell_count()
    }

    fn memory(&self) -> &[u8] {
        &self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::TapeFrame;
    use tui_arcade_core::FrameView;

    fn tape(frames: &[(&[u8], i64, Option<i64>)]) -> Tape {
        Tape::new(
            2,
            1,
            frames
                .iter()
                .map(|(cells, score, next_move)| TapeFrame {
                    score: *score,
                    cells: cells.to_vec(),
                    next_move: *next_move,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn decide_is_repeatable_without_commit() {
        let engine = TapeEngine::new(tape(&[(&[0, 4], 0, Some(1)), (&[4, 0], 1, None)]));
        assert_eq!(
            engine.decide_next_move().unwrap(),
            engine.decide_next_move().unwrap()
        );
        assert_eq!(engine.step(), 0);
    }

    #[test]
    fn commit_advances_frame_and_score() {
        let mut engine = TapeEngine::new(tape(&[(&[0, 4], 0, Some(1)), (&[4, 0], 10, None)]));
        let mv = engine.decide_next_move().unwrap().unwrap();
        engine.commit(mv).unwrap();

        assert_eq!(engine.score(), 10);
        assert_eq!(engine.frame_ptr(), 2);
        assert_eq!(FrameView::acquire(&engine).unwrap().bytes(), &[4, 0]);
        assert!(engine.is_finished());
        assert_eq!(engine.decide_next_move().unwrap(), None);
    }

    #[test]
    fn stale_move_is_rejected() {
        let mut engine = TapeEngine::new(tape(&[
            (&[0, 4], 0, Some(1)),
            (&[4, 0], 0, Some(1)),
            (&[0, 0], 0, None),
        ]));
        let first = engine.decide_next_move().unwrap().unwrap();
        let again = engine.decide_next_move().unwrap().unwrap();
        engine.commit(first).unwrap();
        assert_eq!(engine.commit(again), Err(EngineError::UnexpectedMove));
        assert_eq!(engine.step(), 1);
    }

    #[test]
    fn commit_after_end_is_refused() {
        let mut engine = TapeEngine::new(tape(&[(&[0, 4], 0, Some(1)), (&[4, 0], 0, None)]));
        let mv = engine.decide_next_move().unwrap().unwrap();
        engine.commit(mv).unwrap();
        let forged = TapeMove { step: 1, value: 1 };
        assert_eq!(engine.commit(forged), Err(EngineError::Finished));
    }

    #[test]
    fn region_compacts_past_limit() {
        let mut engine = TapeEngine::with_region_limit(
            tape(&[
                (&[1, 1], 0, Some(0)),
                (&[2, 2], 0, Some(0)),
                (&[3, 3], 0, None),
            ]),
            4,
        );
        for _ in 0..2 {
            let mv = engine.decide_next_move().unwrap().unwrap();
            engine.commit(mv).unwrap();
        }
        assert_eq!(engine.frame_ptr(), 0);
        assert_eq!(engine.memory(), &[3, 3]);
        assert_eq!(FrameView::acquire(&engine).unwrap().bytes(), &[3, 3]);
    }
}
