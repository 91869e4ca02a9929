//! Screen capture domain — public API.
//!
//! This module owns everything between "grab the screen" and "a PNG file on
//! disk". The controller only talks to [`ScreenSource`] and [`ShotStore`].

mod encode;
mod screenshot;
mod storage;

pub use encode::encode_png;
pub use screenshot::{capture_primary_monitor, PrimaryMonitor};
pub use storage::ShotStore;

use std::path::PathBuf;

/// One grabbed screen, already PNG-encoded.
#[derive(Debug, Clone)]
pub struct Frame {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Anything that can produce a full-screen frame on demand.
pub trait ScreenSource {
    fn capture(&self) -> Result<Frame, CaptureError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No monitor available to capture")]
    NoMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("Captured image has zero width or height")]
    ZeroDimension,

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Failed to write screenshot to {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
