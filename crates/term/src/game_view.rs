//! GameView: draws one decoded engine frame onto a [`Canvas`].
//!
//! This module is pure (no I/O). It can be unit-tested.

use tracing::warn;

use crate::canvas::{Canvas, CanvasError};
use crate::core::FrameView;
use crate::fb::Rgb;
use crate::types::CellKind;

pub const OBSTACLE_COLOR: Rgb = Rgb::new(128, 128, 128);
/// Shared by both body kinds.
pub const BODY_COLOR: Rgb = Rgb::new(0, 0, 128);
pub const TARGET_COLOR: Rgb = Rgb::new(220, 50, 47);

/// How a cell kind is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Block(Rgb),
    Ball(Rgb),
}

/// Fixed color policy. `Empty` cells are not drawn.
pub fn paint_for(kind: CellKind) -> Option<Paint> {
    match kind {
        CellKind::Empty => None,
        CellKind::Obstacle => Some(Paint::Block(OBSTACLE_COLOR)),
        CellKind::BodyPrimary | CellKind::BodySecondary => Some(Paint::Block(BODY_COLOR)),
        CellKind::Target => Some(Paint::Ball(TARGET_COLOR)),
    }
}

/// Per-frame drawing statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Cells that produced a draw call.
    pub drawn: usize,
    /// Cells skipped because their byte was not a known kind.
    pub anomalies: usize,
    pub score: i64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Clear, stroke the border, draw every cell, then draw the score.
    ///
    /// Unknown cell bytes are logged and skipped. A draw error stops the frame.
    pub fn render(&self, frame: &FrameView<'_>, canvas: &mut Canvas) -> Result<RenderReport, CanvasError> {
        let mut report = RenderReport {
            score: frame.score(),
            ..RenderReport::default()
        };

        canvas.clear();
        canvas.draw_border();

        for decoded in frame.cells() {
            let cell = match decoded {
                Ok(cell) => cell,
                Err(err) => {
                    warn!(
                        index = err.index,
                        col = err.col,
                        row = err.row,
                        byte = err.byte,
                        "skipping unknown cell byte"
                    );
                    report.anomalies += 1;
                    continue;
                }
            };

            match paint_for(cell.kind) {
                None => {}
                Some(Paint::Block(color)) => {
                    canvas.draw_block(cell.col, cell.row, Some(color))?;
                    report.drawn += 1;
                }
                Some(Paint::Ball(color)) => {
                    canvas.draw_ball(cell.col, cell.row, Some(color))?;
                    report.drawn += 1;
                }
            }
        }

        canvas.draw_score(frame.score());
        Ok(report)
    }
}
