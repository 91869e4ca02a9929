//! Single-threaded polling loop that turns held keys into controller signals.
//!
//! One tick samples `Toggle` first, then `CaptureOne`. A detected signal is
//! handled to completion (a finalize included) and then the loop waits for
//! the input to be released, so a held key fires exactly once.

use crate::capture::ScreenSource;
use crate::controller::{AnalysisStatus, CollectionState, Controller, Outcome};
use crate::llm::Analyzer;
use crate::telegram::Messenger;
use crate::trigger::{wait_for_release, Signal, TriggerSource};
use std::future::Future;
use std::time::Duration;

/// Samples the trigger source once and dispatches at most one signal.
///
/// Returns the handled signal and its outcome, or `None` when nothing was
/// asserted.
pub async fn poll_once<T, S, M, A>(
    trigger: &T,
    controller: &mut Controller<S, M, A>,
    poll: Duration,
) -> Option<(Signal, Outcome)>
where
    T: TriggerSource + ?Sized,
    S: ScreenSource,
    M: Messenger,
    A: Analyzer,
{
    let signal = if trigger.is_triggered(Signal::Toggle) {
        Signal::Toggle
    } else if trigger.is_triggered(Signal::CaptureOne) {
        Signal::CaptureOne
    } else {
        return None;
    };

    let outcome = controller.handle(signal).await;
    log_outcome(&outcome);

    wait_for_release(trigger, signal, poll).await;
    Some((signal, outcome))
}

/// Polls forever at `poll` cadence until `shutdown` resolves.
pub async fn run_until<T, S, M, A, F>(
    trigger: &T,
    controller: &mut Controller<S, M, A>,
    poll: Duration,
    shutdown: F,
) where
    T: TriggerSource + ?Sized,
    S: ScreenSource,
    M: Messenger,
    A: Analyzer,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("[AGENT] Interrupt received");
                break;
            }
            _ = tick(trigger, controller, poll) => {}
        }
    }

    // A finalize cut short leaves the controller active with its batch intact.
    if controller.state() == CollectionState::Active {
        log::warn!(
            "[AGENT] Session interrupted: {} screenshot(s) not submitted; files stay on disk",
            controller.batch().len()
        );
    }
}

async fn tick<T, S, M, A>(trigger: &T, controller: &mut Controller<S, M, A>, poll: Duration)
where
    T: TriggerSource + ?Sized,
    S: ScreenSource,
    M: Messenger,
    A: Analyzer,
{
    poll_once(trigger, controller, poll).await;
    tokio::time::sleep(poll).await;
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Started { captured: true } => {
            log::info!("[AGENT] Collecting: capture key for more, toggle key again to submit")
        }
        Outcome::Started { captured: false } => {
            log::warn!("[AGENT] Collecting, but the first screenshot failed")
        }
        Outcome::Captured(_) | Outcome::Ignored => {}
        Outcome::CaptureDropped => log::warn!("[AGENT] Screenshot dropped"),
        Outcome::Finalized(report) => match report.analysis {
            AnalysisStatus::Skipped => log::info!("[AGENT] Nothing to submit, back to idle"),
            AnalysisStatus::Succeeded | AnalysisStatus::Failed => log::info!(
                "[AGENT] Batch of {} done ({} delivered, analysis {:?}), back to idle",
                report.shots,
                report.delivered.len(),
                report.analysis
            ),
        },
    }
}
