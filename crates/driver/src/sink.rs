//! Where finished frames go.

use anyhow::Result;

use crate::term::{FrameBuffer, TerminalRenderer, Viewport};

/// Destination for rendered frames (the "drawing surface handle").
pub trait FrameSink {
    /// Ambient display size, used when no explicit size is configured.
    fn viewport(&self) -> Option<Viewport>;

    /// Show a finished frame. The sink may leave any contents in `fb`.
    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()>;
}

impl FrameSink for TerminalRenderer {
    fn viewport(&self) -> Option<Viewport> {
        self.terminal_size().map(|(w, h)| Viewport::new(w, h))
    }

    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.draw_swap(fb)
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn viewport(&self) -> Option<Viewport> {
        (**self).viewport()
    }

    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        (**self).present(fb)
    }
}
