//! HTTP agent construction and endpoint validation.

use crate::error::ClientError;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Default maximum response body size for the generation endpoint (1 MB).
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 1024 * 1024;

/// Schemes the generation endpoint may use. The default endpoint is a local
/// plain-HTTP service, so `http` is allowed alongside `https`.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Transport settings for the generation agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Global per-request timeout. `None` leaves ureq's defaults in place.
    pub timeout: Option<Duration>,
    /// Response bodies larger than this are treated as a transport failure.
    pub max_response_bytes: u64,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_SIZE,
            user_agent: format!("vizai/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Validate that a URL can be used as the generation endpoint.
///
/// Enforces:
/// - the URL parses
/// - scheme is `http` or `https`
/// - a host is present
pub fn validate_endpoint(url: &str) -> Result<(), ClientError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| ClientError::InvalidEndpoint(format!("'{}': {}", url, e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ClientError::InvalidEndpoint(format!(
            "scheme '{}' rejected; only http and https are supported. URL: {}",
            parsed.scheme(),
            url
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ClientError::InvalidEndpoint(format!(
            "URL has no host: {}",
            url
        ))),
    }
}

/// Create an HTTP agent configured with native-tls.
///
/// Non-2xx statuses are returned as ordinary responses so the caller can read
/// the server's `{"error": ...}` body.
pub fn agent(options: &HttpOptions) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .http_status_as_error(false)
        .timeout_global(options.timeout)
        .build()
        .into()
}
