//! Typed errors for the token pipeline.

use thiserror::Error;

/// Failure while building or reading a render token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The deflate encoder failed while writing or finishing the stream.
    #[error("Compression failed: {0}")]
    Compress(#[source] std::io::Error),

    /// The token is not valid URL-safe base64.
    #[error("Token is not valid URL-safe base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded payload is not a valid deflate stream for the expected
    /// framing, or it inflated to something other than UTF-8 text.
    #[error("Decompression failed: {0}")]
    Inflate(#[source] std::io::Error),
}
