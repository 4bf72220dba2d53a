//! Core host logic module - pure, deterministic, and testable
//!
//! This crate owns the boundary between the host and an external simulation
//! engine. It has **no dependencies** on terminals, timers or I/O:
//!
//! - [`engine`]: the [`Engine`] capability trait every concrete engine implements
//! - [`view`]: [`FrameView`], the per-cycle read-only window into engine memory
//! - [`decode`]: lazy byte → [`CellKind`](types::CellKind) decoding with anomaly reporting
//!
//! # Memory discipline
//!
//! An engine publishes its current frame as a `(frame_ptr, frame_len)` pair into a
//! raw memory region that may grow (and relocate) on any mutating call. The host
//! never stores a view of that region. Instead it calls [`FrameView::acquire`]
//! once per cycle; the view borrows the engine immutably, so the compiler rejects
//! any attempt to `commit` while a view is still alive.
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{decode, CellKind};
//!
//! let cells: Vec<_> = decode(&[0, 4], 2).collect();
//! assert_eq!(cells[1].as_ref().unwrap().kind, CellKind::Target);
//! ```

pub mod decode;
pub mod engine;
pub mod view;

pub use tui_arcade_types as types;

pub use decode::{decode, DecodeError, DecodedCell, Decoder};
pub use engine::{Engine, EngineError};
pub use types::CellKind;
pub use view::{FrameView, ViewError};
