//! Topic-to-diagram request against the generation endpoint.
//!
//! The endpoint accepts `POST {"topic": "..."}` and answers either
//! `{"diagram": "blockdiag { ... }"}` or `{"error": "..."}`, with the HTTP
//! status telling the two apart.

use crate::error::ClientError;
use crate::http::{self, HttpOptions};
use serde::Serialize;
use std::fmt;
use ureq::Agent;

/// Message used when the server gives no usable `error` text of its own.
pub const FALLBACK_MESSAGE: &str = "Invalid response from server";

/// Request body sent to the generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub topic: &'a str,
}

/// The two fields vizai reads from a generation response.
///
/// Fields that are absent or not strings come out as `None`; any JSON that is
/// not an object yields an empty response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    pub diagram: Option<String>,
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn from_json(json: &serde_json::Value) -> Self {
        let field = |name: &str| {
            json.get(name)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        Self {
            diagram: field("diagram"),
            error: field("error"),
        }
    }
}

/// Diagram-description text returned by the generator. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource(String);

impl DiagramSource {
    /// Returns `None` for the empty string.
    pub fn new(source: impl Into<String>) -> Option<Self> {
        let source = source.into();
        (!source.is_empty()).then_some(Self(source))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DiagramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status and body of a completed HTTP exchange, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between the orchestrator and the network.
pub trait GenerationTransport: Send + Sync {
    /// POST `topic` to `endpoint` and return whatever the server answered.
    ///
    /// Non-2xx statuses are `Ok`; only failures to obtain a response are `Err`.
    fn post_topic(&self, endpoint: &str, topic: &str) -> Result<RawResponse, ClientError>;
}

/// [`GenerationTransport`] backed by a ureq agent.
pub struct HttpTransport {
    agent: Agent,
    options: HttpOptions,
}

impl HttpTransport {
    pub fn new(options: HttpOptions) -> Self {
        Self {
            agent: http::agent(&options),
            options,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(HttpOptions::default())
    }
}

impl GenerationTransport for HttpTransport {
    fn post_topic(&self, endpoint: &str, topic: &str) -> Result<RawResponse, ClientError> {
        http::validate_endpoint(endpoint)?;

        let payload = serde_json::to_string(&GenerateRequest { topic })
            .map_err(|e| ClientError::Transport(format!("Failed to serialize request: {}", e)))?;

        log::debug!("POST {} ({} byte body)", endpoint, payload.len());

        let response = self
            .agent
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("User-Agent", self.options.user_agent.as_str())
            .send(payload.as_bytes())
            .map_err(|e| {
                ClientError::Transport(format!(
                    "Failed to reach generation endpoint '{}': {}",
                    endpoint, e
                ))
            })?;

        let status = response.status().as_u16();
        let mut body = response.into_body();
        let body = body
            .with_config()
            .limit(self.options.max_response_bytes)
            .read_to_string()
            .map_err(|e| ClientError::Transport(format!("Failed to read response body: {}", e)))?;

        log::debug!("Generation endpoint answered {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}

/// Validate a raw response and extract the diagram source.
///
/// The body is parsed as JSON first, whatever the status, so a non-JSON error
/// page surfaces as [`ClientError::MalformedBody`]. After that, a non-2xx
/// status or a missing/empty `diagram` is [`ClientError::Rejected`], carrying
/// the server's `error` text when it is a non-empty string.
pub fn interpret_response(raw: &RawResponse) -> Result<DiagramSource, ClientError> {
    let json: serde_json::Value = serde_json::from_str(&raw.body)
        .map_err(|e| ClientError::MalformedBody(format!("Failed to parse response JSON: {}", e)))?;

    let response = GenerateResponse::from_json(&json);

    if raw.is_success()
        && let Some(source) = response.diagram.and_then(DiagramSource::new)
    {
        return Ok(source);
    }

    Err(ClientError::Rejected {
        status: raw.status,
        message: response.error.filter(|m| !m.is_empty()),
    })
}
