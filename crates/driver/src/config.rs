//! Host configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::term::Viewport;
use crate::types::DEFAULT_FRAME_DELAY_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub tape_path: Option<PathBuf>,
    /// Explicit canvas size; `None` falls back to the sink's viewport.
    pub size: Option<Viewport>,
    pub frame_delay: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tape_path: None,
            size: None,
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            log_path: None,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup. Unparseable values fall back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let number = |key: &str| non_empty(key).and_then(|s| s.parse::<u64>().ok());

        let size = match (number("ARCADE_WIDTH"), number("ARCADE_HEIGHT")) {
            (Some(w), Some(h)) if w > 0 && h > 0 && w <= u16::MAX as u64 && h <= u16::MAX as u64 => {
                Some(Viewport::new(w as u16, h as u16))
            }
            _ => None,
        };

        let frame_delay = Duration::from_millis(
            number("ARCADE_FRAME_DELAY_MS").unwrap_or(DEFAULT_FRAME_DELAY_MS),
        );

        Self {
            tape_path: non_empty("ARCADE_TAPE").map(PathBuf::from),
            size,
            frame_delay,
            log_path: non_empty("ARCADE_LOG_PATH").map(PathBuf::from),
        }
    }
}
