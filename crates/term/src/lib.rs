//! Terminal "game renderer" module.
//!
//! A small rendering layer that turns decoded engine frames into pixels. It
//! avoids widget/layout libraries and draws into a plain framebuffer that is
//! flushed to the terminal with diff-based redraws.
//!
//! - [`fb`]: styled character framebuffer (one cell = one pixel)
//! - [`canvas`]: grid-addressed drawing (border, score, blocks, balls)
//! - [`game_view`]: the frame → canvas pipeline and the fixed color policy
//! - [`renderer`]: crossterm backend

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use canvas::{Canvas, CanvasError, Viewport, DEFAULT_FILL};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{paint_for, GameView, Paint, RenderReport, BODY_COLOR, OBSTACLE_COLOR, TARGET_COLOR};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
