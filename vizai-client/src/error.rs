//! Typed errors for the generation client.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The configured endpoint is not a usable http(s) URL.
    #[error("Invalid generation endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request never produced a response (DNS, connect, TLS, timeout,
    /// body read failure).
    #[error("{0}")]
    Transport(String),

    /// The server answered, but the body is not the expected JSON.
    #[error("{0}")]
    MalformedBody(String),

    /// The server answered without a usable diagram.
    ///
    /// `message` is the server's `error` field when it supplied a non-empty one.
    #[error("{}", .message.as_deref().unwrap_or(crate::generate::FALLBACK_MESSAGE))]
    Rejected { status: u16, message: Option<String> },
}
