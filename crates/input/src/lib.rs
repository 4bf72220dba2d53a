//! Terminal input module (host-facing).
//!
//! Maps `crossterm` key events to [`HostAction`]s. The engine decides every
//! move on its own, so the only thing a user can do is end the session.

pub mod map;

pub use map::{handle_key_event, should_quit, HostAction};
