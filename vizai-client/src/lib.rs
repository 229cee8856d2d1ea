//! Client for the vizai diagram-generation endpoint.
//!
//! Provides:
//! - `http`: ureq agent construction and endpoint URL validation
//! - `generate`: request/response types, the [`GenerationTransport`] seam and
//!   response validation
//! - `error`: [`ClientError`]

pub mod error;
pub mod generate;
pub mod http;

pub use error::ClientError;
pub use generate::{
    DiagramSource, FALLBACK_MESSAGE, GenerateRequest, GenerateResponse, GenerationTransport,
    HttpTransport, RawResponse, interpret_response,
};
pub use http::{HttpOptions, validate_endpoint};
