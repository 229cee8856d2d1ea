//! Deflate compression of diagram source text.
//!
//! Kroki decodes the zlib-wrapped form (RFC 1950), which is also what a
//! browser `CompressionStream("deflate")` produces, so [`Framing::Zlib`] is
//! the default. [`Framing::Raw`] emits a bare RFC 1951 stream for decoders
//! that do not expect the two-byte header and Adler-32 trailer.

use crate::error::TokenError;
use flate2::Compression;
use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, ZlibEncoder};
use std::io::{Read, Write};

/// Highest deflate level accepted by flate2.
pub const MAX_LEVEL: u32 = 9;

/// Container around the deflate stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// zlib header + deflate + Adler-32 trailer (default)
    #[default]
    Zlib,
    /// Bare deflate stream
    Raw,
}

/// Parameters that, together with the input, fully determine the output bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSettings {
    pub framing: Framing,
    /// Deflate level 0-9; larger values are clamped to [`MAX_LEVEL`].
    pub level: u32,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            framing: Framing::Zlib,
            level: MAX_LEVEL,
        }
    }
}

impl CompressionSettings {
    pub fn new(framing: Framing, level: u32) -> Self {
        Self {
            framing,
            level: level.min(MAX_LEVEL),
        }
    }

    fn compression(&self) -> Compression {
        Compression::new(self.level.min(MAX_LEVEL))
    }
}

/// Compress UTF-8 text. Empty input yields a valid stream that inflates to `""`.
pub fn compress(text: &str, settings: CompressionSettings) -> Result<Vec<u8>, TokenError> {
    let level = settings.compression();
    match settings.framing {
        Framing::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), level);
            encoder
                .write_all(text.as_bytes())
                .map_err(TokenError::Compress)?;
            encoder.finish().map_err(TokenError::Compress)
        }
        Framing::Raw => {
            let mut encoder = DeflateEncoder::new(Vec::new(), level);
            encoder
                .write_all(text.as_bytes())
                .map_err(TokenError::Compress)?;
            encoder.finish().map_err(TokenError::Compress)
        }
    }
}

/// Inflate a payload produced by [`compress`] back into text.
pub fn decompress(payload: &[u8], framing: Framing) -> Result<String, TokenError> {
    let mut text = String::new();
    match framing {
        Framing::Zlib => ZlibDecoder::new(payload).read_to_string(&mut text),
        Framing::Raw => DeflateDecoder::new(payload).read_to_string(&mut text),
    }
    .map_err(TokenError::Inflate)?;
    Ok(text)
}
