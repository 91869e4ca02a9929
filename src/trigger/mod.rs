//! The two logical inputs the controller reacts to.
//!
//! A [`TriggerSource`] only reports whether a signal's input is held right
//! now. Edge detection lives in the event loop: a held input fires once, then
//! [`wait_for_release`] blocks until it is let go.

mod keyboard;

pub use keyboard::{parse_key_name, KeyboardTrigger};

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Start a collection session, or finalize the running one.
    Toggle,
    /// Add one shot to the running session.
    CaptureOne,
}

impl Signal {
    pub fn name(self) -> &'static str {
        match self {
            Signal::Toggle => "toggle",
            Signal::CaptureOne => "captureOne",
        }
    }
}

pub trait TriggerSource {
    /// True while the input bound to `signal` is asserted.
    fn is_triggered(&self, signal: Signal) -> bool;
}

/// Blocks until the input bound to `signal` is no longer asserted.
///
/// Returns the number of polls spent waiting.
pub async fn wait_for_release<T>(source: &T, signal: Signal, poll: Duration) -> u32
where
    T: TriggerSource + ?Sized,
{
    let mut polls = 0;
    while source.is_triggered(signal) {
        polls += 1;
        tokio::time::sleep(poll).await;
    }
    if polls > 0 {
        log::debug!("[TRIGGER] {} released after {} polls", signal.name(), polls);
    }
    polls
}
