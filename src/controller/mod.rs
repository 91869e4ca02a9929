//! Capture-Batch Controller.
//!
//! Owns the collection flag and the batch, and is the only place either is
//! mutated. Two signals drive it:
//!
//! - `Toggle` while idle: start a session with one immediate shot.
//! - `Toggle` while active: finalize the batch and go idle.
//! - `CaptureOne` while active: add a shot. Ignored while idle.

mod batch;
mod finalize;

pub use batch::{Batch, Shot};
pub use finalize::{compose_summary, finalize, image_caption, AnalysisStatus, FinalizeReport};

use crate::capture::{CaptureError, ScreenSource, ShotStore};
use crate::llm::Analyzer;
use crate::telegram::Messenger;
use crate::trigger::Signal;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionState {
    #[default]
    Idle,
    Active,
}

/// Result of handling one signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Session started; `captured` is false when the first shot failed.
    Started { captured: bool },
    /// A shot was added; holds the new batch size.
    Captured(usize),
    /// Capture failed; batch unchanged.
    CaptureDropped,
    /// `CaptureOne` arrived while idle.
    Ignored,
    Finalized(FinalizeReport),
}

pub struct Controller<S, M, A> {
    source: S,
    messenger: M,
    analyzer: A,
    store: ShotStore,
    delivery_delay: Duration,
    state: CollectionState,
    batch: Batch,
}

impl<S, M, A> Controller<S, M, A>
where
    S: ScreenSource,
    M: Messenger,
    A: Analyzer,
{
    pub fn new(
        source: S,
        messenger: M,
        analyzer: A,
        store: ShotStore,
        delivery_delay: Duration,
    ) -> Self {
        Self {
            source,
            messenger,
            analyzer,
            store,
            delivery_delay,
            state: CollectionState::Idle,
            batch: Batch::new(),
        }
    }

    pub fn state(&self) -> CollectionState {
        self.state
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn handle(&mut self, signal: Signal) -> Outcome {
        match signal {
            Signal::Toggle => self.toggle().await,
            Signal::CaptureOne => self.capture_one(),
        }
    }

    pub async fn toggle(&mut self) -> Outcome {
        match self.state {
            CollectionState::Idle => {
                self.state = CollectionState::Active;
                self.batch.clear();
                log::info!("[BATCH] Started collecting screenshots");

                let captured = self.take_shot().is_ok();
                Outcome::Started { captured }
            }
            CollectionState::Active => {
                log::info!("[BATCH] Submitting {} screenshot(s)", self.batch.len());

                let report = finalize(
                    self.batch.shots(),
                    &self.messenger,
                    &self.analyzer,
                    self.store.root(),
                    self.delivery_delay,
                )
                .await;

                // Cleared only once finalize ran to completion.
                self.batch.clear();
                self.state = CollectionState::Idle;
                Outcome::Finalized(report)
            }
        }
    }

    pub fn capture_one(&mut self) -> Outcome {
        if self.state == CollectionState::Idle {
            return Outcome::Ignored;
        }
        match self.take_shot() {
            Ok(size) => Outcome::Captured(size),
            Err(_) => Outcome::CaptureDropped,
        }
    }

    /// Captures, persists and appends one shot. On failure the batch is
    /// left as it was.
    fn take_shot(&mut self) -> Result<usize, CaptureError> {
        let position = self.batch.next_position();

        let result = self.source.capture().and_then(|frame| {
            let path = self.store.persist(&frame.png, position)?;
            Ok(Shot::new(frame.png, frame.width, frame.height, path))
        });

        match result {
            Ok(shot) => {
                let (w, h) = shot.dimensions();
                self.batch.push(shot);
                log::info!("[BATCH] Screenshot {} taken ({}x{})", self.batch.len(), w, h);
                Ok(self.batch.len())
            }
            Err(e) => {
                log::error!("[CAPTURE] Screenshot {} failed: {}", position, e);
                Err(e)
            }
        }
    }
}
