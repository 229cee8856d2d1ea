//! Request state and the values that flow into and out of the orchestrator.

use crate::render_url::RenderUrl;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A trimmed, non-empty topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    /// Trim `raw`; whitespace-only input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the current (or last) request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(RenderUrl),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn render_url(&self) -> Option<&RenderUrl> {
        match self {
            RequestState::Success(url) => Some(url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn view(&self) -> StateView {
        StateView {
            loading: self.is_loading(),
            error: self.error().map(str::to_string),
            render_url: self.render_url().map(|url| url.as_str().to_string()),
        }
    }
}

/// What a presentation layer needs to draw: a busy flag, an error line and an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateView {
    pub loading: bool,
    pub error: Option<String>,
    pub render_url: Option<String>,
}

/// Read-only, cloneable access to an orchestrator's state.
#[derive(Debug, Clone)]
pub struct StateHandle(pub(super) Arc<Mutex<RequestState>>);

impl StateHandle {
    pub fn snapshot(&self) -> RequestState {
        self.0.lock().clone()
    }

    pub fn view(&self) -> StateView {
        self.0.lock().view()
    }
}

/// Why a submission was turned away without touching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The topic was empty after trimming.
    EmptyTopic,
    /// Another request is still in flight.
    Busy,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyTopic => f.write_str("topic must not be empty"),
            RejectReason::Busy => f.write_str("a diagram is already being generated"),
        }
    }
}

/// Outcome of handing a topic to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Rejected(RejectReason),
    /// The request ran; the final state is either `Success` or `Failed`.
    Completed(RequestState),
}

impl Submission {
    pub fn render_url(&self) -> Option<&RenderUrl> {
        match self {
            Submission::Completed(state) => state.render_url(),
            Submission::Rejected(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.render_url().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_is_trimmed() {
        assert_eq!(Topic::new("  TCP handshake \n").unwrap().as_str(), "TCP handshake");
    }

    #[test]
    fn test_whitespace_topic_is_rejected() {
        assert!(Topic::new("").is_none());
        assert!(Topic::new(" \t\r\n ").is_none());
    }

    #[test]
    fn test_idle_view() {
        assert_eq!(RequestState::Idle.view(), StateView::default());
    }

    #[test]
    fn test_loading_view_has_no_leftovers() {
        let view = RequestState::Loading.view();
        assert!(view.loading);
        assert_eq!(view.error, None);
        assert_eq!(view.render_url, None);
    }

    #[test]
    fn test_failed_view() {
        let view = RequestState::Failed("topic too vague".to_string()).view();
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("topic too vague"));
        assert_eq!(view.render_url, None);
    }

    #[test]
    fn test_rejected_submission_has_no_url() {
        let submission = Submission::Rejected(RejectReason::Busy);
        assert!(!submission.is_success());
        assert_eq!(submission.render_url(), None);
    }
}
