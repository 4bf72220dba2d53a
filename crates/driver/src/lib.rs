//! Frame driver - paces an [`Engine`](tui_arcade_core::Engine) and renders its frames
//!
//! Every cycle runs strictly in this order:
//!
//! 1. **Decide**: ask the engine for its next move. `None` ends the session.
//! 2. **Render**: acquire a fresh [`FrameView`](tui_arcade_core::FrameView),
//!    decode it and draw it onto the session [`Canvas`](tui_arcade_term::Canvas).
//!    The view is dropped before anything else happens.
//! 3. **Present**: hand the framebuffer to a [`FrameSink`].
//! 4. **Commit**: pass the decided move back to the engine.
//!
//! Between cycles the driver yields once (a short sleep) on a single-threaded
//! runtime. A [`StopHandle`] lets outside code end the loop at that point.
//!
//! # Configuration
//!
//! [`HostConfig::from_env`] reads:
//!
//! - `ARCADE_TAPE`: session tape to replay
//! - `ARCADE_WIDTH` / `ARCADE_HEIGHT`: canvas size (default: terminal size)
//! - `ARCADE_FRAME_DELAY_MS`: pause between cycles (default: 1)
//! - `ARCADE_LOG_PATH`: write logs to this file

pub mod config;
pub mod driver;
pub mod mount;
pub mod sink;

pub use tui_arcade_core as core;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

pub use config::HostConfig;
pub use driver::{Cycle, DriverError, DriverState, FrameDriver, SessionSummary, StopHandle, StopReason};
pub use mount::{mount, MountOptions};
pub use sink::FrameSink;
