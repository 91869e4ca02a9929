//! In-memory collaborators shared by the integration tests.
//!
//! Every fake writes into one shared call log so tests can assert ordering
//! across messaging and analysis.

#![allow(dead_code)]

use screenshot_agent_lib::capture::{CaptureError, Frame, ScreenSource, ShotStore};
use screenshot_agent_lib::controller::Controller;
use screenshot_agent_lib::llm::{AnalysisError, Analyzer};
use screenshot_agent_lib::telegram::{DeliveryError, Messenger, TransportError};
use screenshot_agent_lib::trigger::{Signal, TriggerSource};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Image { path: PathBuf, caption: String },
    Analyze { images: Vec<Vec<u8>>, prompt: String },
    Text(String),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Returns a distinct payload per capture (`[n; 8]` for the n-th call) and
/// fails on the listed 1-based call numbers.
#[derive(Default)]
pub struct FakeScreen {
    calls: Cell<u8>,
    fail_on: HashSet<u8>,
}

impl FakeScreen {
    pub fn failing_on(calls: &[u8]) -> Self {
        Self {
            calls: Cell::new(0),
            fail_on: calls.iter().copied().collect(),
        }
    }

    pub fn calls(&self) -> u8 {
        self.calls.get()
    }
}

impl ScreenSource for FakeScreen {
    fn capture(&self) -> Result<Frame, CaptureError> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if self.fail_on.contains(&n) {
            return Err(CaptureError::CaptureFailed(format!("call {n} failed")));
        }
        Ok(Frame {
            png: vec![n; 8],
            width: 1920,
            height: 1080,
        })
    }
}

/// Records every call; image deliveries fail for the listed 1-based
/// delivery numbers.
pub struct FakeMessenger {
    log: CallLog,
    deliveries: Cell<usize>,
    fail_on: HashSet<usize>,
}

impl FakeMessenger {
    pub fn new(log: CallLog) -> Self {
        Self::failing_on(log, &[])
    }

    pub fn failing_on(log: CallLog, deliveries: &[usize]) -> Self {
        Self {
            log,
            deliveries: Cell::new(0),
            fail_on: deliveries.iter().copied().collect(),
        }
    }
}

impl Messenger for FakeMessenger {
    async fn send_image(&self, path: &Path, caption: &str) -> Result<(), DeliveryError> {
        let n = self.deliveries.get() + 1;
        self.deliveries.set(n);
        self.log.borrow_mut().push(Call::Image {
            path: path.to_path_buf(),
            caption: caption.to_string(),
        });
        if self.fail_on.contains(&n) {
            return Err(TransportError::Status {
                status: 400,
                body: "Bad Request: IMAGE_PROCESS_FAILED".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn send_text(&self, message: &str) {
        self.log.borrow_mut().push(Call::Text(message.to_string()));
    }
}

pub struct FakeAnalyzer {
    log: CallLog,
    fail: bool,
}

impl FakeAnalyzer {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail: false }
    }

    pub fn failing(log: CallLog) -> Self {
        Self { log, fail: true }
    }
}

impl Analyzer for FakeAnalyzer {
    async fn analyze(&self, images: &[&[u8]], prompt: &str) -> Result<String, AnalysisError> {
        self.log.borrow_mut().push(Call::Analyze {
            images: images.iter().map(|i| i.to_vec()).collect(),
            prompt: prompt.to_string(),
        });
        if self.fail {
            return Err(AnalysisError::Status {
                status: 500,
                body: "internal".to_string(),
            });
        }
        Ok(format!("Answers for {} screenshot(s)", images.len()))
    }
}

pub type TestController = Controller<FakeScreen, FakeMessenger, FakeAnalyzer>;

/// Controller over fakes, storing into a fresh temp dir.
pub struct Harness {
    pub controller: TestController,
    pub log: CallLog,
    pub dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(screen: FakeScreen) -> Self {
        Self::build(screen, &[], false, Duration::ZERO)
    }

    pub fn build(
        screen: FakeScreen,
        failed_deliveries: &[usize],
        analysis_fails: bool,
        delay: Duration,
    ) -> Self {
        let log: CallLog = Rc::default();
        let dir = tempfile::tempdir().unwrap();
        let store = ShotStore::create(dir.path()).unwrap();
        let messenger = FakeMessenger::failing_on(log.clone(), failed_deliveries);
        let analyzer = if analysis_fails {
            FakeAnalyzer::failing(log.clone())
        } else {
            FakeAnalyzer::new(log.clone())
        };
        Self {
            controller: Controller::new(screen, messenger, analyzer, store, delay),
            log,
            dir,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }
}

/// Each signal reports "held" for a fixed number of queries, then released.
#[derive(Default)]
pub struct HeldKeys {
    remaining: RefCell<HashMap<Signal, u32>>,
    queries: Cell<u32>,
}

impl HeldKeys {
    pub fn hold(self, signal: Signal, queries: u32) -> Self {
        self.remaining.borrow_mut().insert(signal, queries);
        self
    }

    pub fn queries(&self) -> u32 {
        self.queries.get()
    }
}

impl TriggerSource for HeldKeys {
    fn is_triggered(&self, signal: Signal) -> bool {
        self.queries.set(self.queries.get() + 1);
        let mut remaining = self.remaining.borrow_mut();
        match remaining.get_mut(&signal) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        }
    }
}
