//! Shared integration test helpers for vizai.
//!
//! Fake [`GenerationTransport`] implementations that stand in for the
//! diagram-generation endpoint, so orchestrator tests run without a network.
//!
//! ```ignore
//! mod common;
//! use common::ScriptedTransport;
//! ```

#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use vizai::client::{ClientError, GenerationTransport, RawResponse};

pub const TEST_ENDPOINT: &str = "http://localhost:5000/generate";

pub const SAMPLE_DIAGRAM: &str = "blockdiag { A -> B -> C; }";

/// Replies with the same scripted result every time and records each call.
pub struct ScriptedTransport {
    reply: Result<RawResponse, ClientError>,
    calls: AtomicUsize,
    topics: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::with_result(Ok(RawResponse::new(status, body)))
    }

    pub fn diagram(diagram: &str) -> Self {
        let body = serde_json::json!({ "diagram": diagram }).to_string();
        Self::replying(200, &body)
    }

    pub fn failing(error: ClientError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(reply: Result<RawResponse, ClientError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            topics: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().clone()
    }
}

impl GenerationTransport for ScriptedTransport {
    fn post_topic(&self, _endpoint: &str, topic: &str) -> Result<RawResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.topics.lock().push(topic.to_string());
        self.reply.clone()
    }
}

/// Blocks inside `post_topic` until the test releases it.
///
/// `entered` receives one message when a call starts, so the test knows the
/// orchestrator is mid-request before it tries a second submission.
pub struct BlockingTransport {
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<RawResponse>>,
    calls: AtomicUsize,
}

/// Test-side ends of a [`BlockingTransport`].
pub struct BlockingControl {
    pub entered: Receiver<()>,
    pub release: Sender<RawResponse>,
}

impl BlockingTransport {
    pub fn new() -> (Self, BlockingControl) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let transport = Self {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
            calls: AtomicUsize::new(0),
        };
        let control = BlockingControl {
            entered: entered_rx,
            release: release_tx,
        };
        (transport, control)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GenerationTransport for BlockingTransport {
    fn post_topic(&self, _endpoint: &str, _topic: &str) -> Result<RawResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.entered.lock().send(());
        self.release
            .lock()
            .recv()
            .map_err(|e| ClientError::Transport(e.to_string()))
    }
}

/// Panics mid-request, as a buggy transport might.
pub struct PanickingTransport;

impl GenerationTransport for PanickingTransport {
    fn post_topic(&self, _endpoint: &str, _topic: &str) -> Result<RawResponse, ClientError> {
        panic!("transport exploded");
    }
}
