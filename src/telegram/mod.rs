//! Messaging collaborator — Telegram Bot API.
//!
//! Images go out one call per file; text goes through [`split_message`] so
//! anything over Telegram's limit is sent as numbered parts.

mod chunk;
mod client;

pub use chunk::{split_message, MAX_MESSAGE_CHARS};
pub use client::TelegramClient;

use std::path::{Path, PathBuf};

/// Outbound messaging used by the finalize procedure.
#[allow(async_fn_in_trait)]
pub trait Messenger {
    /// Sends one image file with a caption. No retries.
    async fn send_image(&self, path: &Path, caption: &str) -> Result<(), DeliveryError>;

    /// Sends text, splitting it into parts when needed.
    ///
    /// Per-part failures are logged by the implementation, never returned.
    async fn send_text(&self, message: &str);
}

/// A single HTTP exchange with the Bot API failed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Telegram returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// One image in a batch could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to read image {path}: {source}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}
