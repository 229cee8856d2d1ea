//! Render-token pipeline for vizai.
//!
//! Turns diagram-description text into a compact token that can be embedded
//! in a render-service URL path, and back again:
//!
//! - `compress`: deflate (zlib-wrapped or raw) with a configurable level
//! - `encode`: URL-safe, padding-free base64
//! - `error`: [`TokenError`] shared by both stages
//!
//! ```
//! use vizai_token::{CompressionSettings, diagram_token, source_from_token};
//!
//! let settings = CompressionSettings::default();
//! let token = diagram_token("blockdiag { A -> B }", settings).unwrap();
//! assert!(!token.as_str().contains(['+', '/', '=']));
//! assert_eq!(
//!     source_from_token(token.as_str(), settings.framing).unwrap(),
//!     "blockdiag { A -> B }"
//! );
//! ```

pub mod compress;
pub mod encode;
pub mod error;

pub use compress::{CompressionSettings, Framing, compress, decompress};
pub use encode::{RenderToken, decode, encode};
pub use error::TokenError;

/// Compress `source` and encode the result as a [`RenderToken`].
pub fn diagram_token(
    source: &str,
    settings: CompressionSettings,
) -> Result<RenderToken, TokenError> {
    let payload = compress(source, settings)?;
    let token = encode(&payload);
    log::trace!(
        "Encoded {} source bytes into {} payload bytes ({} token chars)",
        source.len(),
        payload.len(),
        token.len()
    );
    Ok(token)
}

/// Recover the diagram source carried by a token built with [`diagram_token`].
///
/// `framing` must match the framing the token was compressed with.
pub fn source_from_token(token: &str, framing: Framing) -> Result<String, TokenError> {
    let payload = decode(token)?;
    decompress(&payload, framing)
}
