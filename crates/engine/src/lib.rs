//! Concrete engines for the arcade host.
//!
//! The host talks to engines only through [`tui_arcade_core::Engine`]. This crate
//! ships [`TapeEngine`], which replays a recorded session instead of running
//! simulation rules: every frame, score and move comes from a [`Tape`].
//!
//! # Tape format
//!
//! ```json
//! {
//!   "cols": 3,
//!   "rows": 1,
//!   "frames": [
//!     { "score": 0, "cells": [1, 4, 1], "next_move": 1 },
//!     { "score": 5, "cells": [1, 0, 1], "next_move": null }
//!   ]
//! }
//! ```
//!
//! Only the last frame may have `next_move: null`; it marks the end of the session.
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{Engine, FrameView};
//! use tui_arcade_engine::{Tape, TapeEngine};
//!
//! let tape = Tape::from_json_str(
//!     r#"{"cols":2,"rows":1,"frames":[
//!         {"score":0,"cells":[0,4],"next_move":1},
//!         {"score":3,"cells":[4,0],"next_move":null}]}"#,
//! ).unwrap();
//! let mut engine = TapeEngine::new(tape);
//!
//! let mv = engine.decide_next_move().unwrap().unwrap();
//! engine.commit(mv).unwrap();
//! assert_eq!(FrameView::acquire(&engine).unwrap().bytes(), &[4, 0]);
//! assert!(engine.decide_next_move().unwrap().is_none());
//! ```

pub mod replay;
pub mod tape;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use replay::{TapeEngine, TapeMove, DEFAULT_REGION_LIMIT};
pub use tape::{Tape, TapeError, TapeFrame};
