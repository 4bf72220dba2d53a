//! Host entry point: size a canvas, build a driver and run it to completion.

use std::time::Duration;

use tracing::info;

use crate::config::HostConfig;
use crate::core::Engine;
use crate::driver::{DriverError, FrameDriver, SessionSummary, StopHandle};
use crate::sink::FrameSink;
use crate::term::{Canvas, Viewport};
use crate::types::DEFAULT_FRAME_DELAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOptions {
    /// Canvas size; `None` uses the sink's current viewport.
    pub size: Option<Viewport>,
    pub frame_delay: Duration,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            size: None,
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
        }
    }
}

impl From<&HostConfig> for MountOptions {
    fn from(config: &HostConfig) -> Self {
        Self {
            size: config.size,
            frame_delay: config.frame_delay,
        }
    }
}

/// Mount an engine onto a sink and drive it until it finishes or `stop` fires.
///
/// The canvas is sized once, from `options.size` or else the sink's viewport,
/// and is never resized during the session.
pub async fn mount<E, S>(
    engine: E,
    sink: S,
    options: MountOptions,
    stop: &StopHandle,
) -> Result<SessionSummary, DriverError>
where
    E: Engine,
    S: FrameSink,
{
    let viewport = options
        .size
        .or_else(|| sink.viewport())
        .ok_or(DriverError::NoViewport)?;
    let canvas = Canvas::for_viewport(viewport, engine.grid())?;

    info!(
        width = viewport.width,
        height = viewport.height,
        cols = engine.cols(),
        rows = engine.rows(),
        "mounting session"
    );

    FrameDriver::new(engine, canvas, sink)?
        .with_frame_delay(options.frame_delay)
        .with_stop_handle(stop)
        .run()
        .await
}
