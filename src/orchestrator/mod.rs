//! Request orchestration: topic in, render URL (or error message) out.
//!
//! A request runs as a two-stage pipeline:
//! 1. `fetch_diagram`: POST the topic and validate the generator's answer
//! 2. `encode_diagram`: compress + encode the diagram into a render URL
//!
//! The orchestrator is the only writer of [`RequestState`]. At most one
//! request is in flight at a time; a concurrent submission is rejected, not
//! queued. There are no retries: a failed attempt needs a fresh submission.

mod state;

pub use state::{RejectReason, RequestState, StateHandle, StateView, Submission, Topic};

use crate::error::{DiagramError, GENERIC_FAILURE};
use crate::render_url::{RenderTarget, RenderUrl};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use vizai_client::{
    DiagramSource, GenerationTransport, HttpOptions, HttpTransport, interpret_response,
};
use vizai_config::Config;

/// Callback run after every state transition.
pub type StateObserver = Box<dyn Fn(&RequestState) + Send + Sync>;

pub struct Orchestrator<T: GenerationTransport = HttpTransport> {
    transport: T,
    endpoint: String,
    target: RenderTarget,
    state: Arc<Mutex<RequestState>>,
    in_flight: AtomicBool,
    observer: Option<StateObserver>,
}

impl Orchestrator<HttpTransport> {
    /// Build an orchestrator that talks HTTP to the configured endpoint.
    pub fn from_config(config: &Config) -> Self {
        let options = HttpOptions {
            timeout: config.generator.timeout(),
            max_response_bytes: config.generator.max_response_bytes,
            ..HttpOptions::default()
        };
        Self::new(
            HttpTransport::new(options),
            config.generator.endpoint.clone(),
            RenderTarget::from_config(&config.render),
        )
    }
}

impl<T: GenerationTransport> Orchestrator<T> {
    pub fn new(transport: T, endpoint: impl Into<String>, target: RenderTarget) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            target,
            state: Arc::new(Mutex::new(RequestState::Idle)),
            in_flight: AtomicBool::new(false),
            observer: None,
        }
    }

    pub fn with_observer(
        mut self,
        observer: impl Fn(&RequestState) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn handle(&self) -> StateHandle {
        StateHandle(Arc::clone(&self.state))
    }

    pub fn state(&self) -> RequestState {
        self.state.lock().clone()
    }

    pub fn view(&self) -> StateView {
        self.state.lock().view()
    }

    /// `true` from the moment a request is accepted until its guard drops.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Entry point for a presentation layer: trims the raw input and runs a
    /// request unless it is empty.
    pub fn submit(&self, raw: &str) -> Submission {
        match Topic::new(raw) {
            Some(topic) => self.generate_diagram(topic),
            None => {
                log::debug!("Ignoring empty topic submission");
                Submission::Rejected(RejectReason::EmptyTopic)
            }
        }
    }

    /// Run one full request cycle for `topic`.
    ///
    /// Returns `Rejected(Busy)` without side effects when another request is
    /// in flight. Otherwise the state goes `Loading` → `Success` | `Failed`
    /// and the final state is returned.
    pub fn generate_diagram(&self, topic: Topic) -> Submission {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("Ignoring topic '{}': a request is already in flight", topic);
            return Submission::Rejected(RejectReason::Busy);
        }
        let _guard = LoadingGuard {
            state: &self.state,
            in_flight: &self.in_flight,
            observer: self.observer.as_ref(),
        };

        log::info!("Generating diagram for topic: {}", topic);
        self.transition(RequestState::Loading);

        let result = self
            .fetch_diagram(&topic)
            .and_then(|source| self.encode_diagram(&source));
        let next = match result {
            Ok(url) => {
                log::info!("Render URL: {}", url);
                RequestState::Success(url)
            }
            Err(e) => {
                log::warn!("Diagram request for '{}' failed: {}", topic, e);
                RequestState::Failed(e.user_message())
            }
        };

        self.transition(next.clone());
        Submission::Completed(next)
    }

    /// Stage 1: ask the generator for a diagram and validate the answer.
    pub fn fetch_diagram(&self, topic: &Topic) -> Result<DiagramSource, DiagramError> {
        let raw = self.transport.post_topic(&self.endpoint, topic.as_str())?;
        let source = interpret_response(&raw)?;
        log::debug!("Blockdiag code from server: {}", source);
        Ok(source)
    }

    /// Stage 2: turn a diagram into its render URL.
    pub fn encode_diagram(&self, source: &DiagramSource) -> Result<RenderUrl, DiagramError> {
        let url = self.target.render_url(source.as_str())?;
        log::debug!(
            "Encoded {} source bytes into a {} byte URL",
            source.as_str().len(),
            url.as_str().len()
        );
        Ok(url)
    }

    fn transition(&self, next: RequestState) {
        *self.state.lock() = next.clone();
        if let Some(observer) = &self.observer {
            observer(&next);
        }
    }
}

/// Clears the in-flight flag on every exit path, unwinding included.
///
/// A request that ends while still `Loading` is marked failed and the
/// observer is told, so a viewer never stays on "Generating...".
struct LoadingGuard<'a> {
    state: &'a Mutex<RequestState>,
    in_flight: &'a AtomicBool,
    observer: Option<&'a StateObserver>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        let stuck = state.is_loading();
        if stuck {
            log::error!("Request ended without a result; marking it failed");
            *state = RequestState::Failed(GENERIC_FAILURE.to_string());
        }
        let final_state = state.clone();
        drop(state);
        self.in_flight.store(false, Ordering::SeqCst);

        if stuck && let Some(observer) = self.observer {
            observer(&final_state);
        }
    }
}
