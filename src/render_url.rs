//! Render URL construction.
//!
//! A render URL has the fixed shape
//! `https://<render-host>/blockdiag/svg/<token>`, where the token is the
//! compressed, URL-safe encoded diagram source (see `vizai_token`).

use std::fmt;
use vizai_config::{DeflateFraming, RenderConfig};
use vizai_token::{CompressionSettings, Framing, RenderToken, TokenError};

/// Diagram language segment of the URL path
pub const DIAGRAM_TYPE: &str = "blockdiag";

/// Output format segment of the URL path
pub const OUTPUT_FORMAT: &str = "svg";

pub const DEFAULT_RENDER_HOST: &str = "kroki.io";

/// A complete URL the render service turns into an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderUrl(String);

impl RenderUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render host plus the compression used for its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    host: String,
    compression: CompressionSettings,
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_HOST, CompressionSettings::default())
    }
}

impl RenderTarget {
    pub fn new(host: impl Into<String>, compression: CompressionSettings) -> Self {
        Self {
            host: host.into(),
            compression,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            config.host.clone(),
            CompressionSettings::new(framing_from_config(config.framing), config.compression_level),
        )
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn compression(&self) -> CompressionSettings {
        self.compression
    }

    /// Everything before the token, including the trailing slash.
    pub fn prefix(&self) -> String {
        format!("https://{}/{}/{}/", self.host, DIAGRAM_TYPE, OUTPUT_FORMAT)
    }

    pub fn url_for_token(&self, token: &RenderToken) -> RenderUrl {
        RenderUrl(format!("{}{}", self.prefix(), token))
    }

    /// Compress, encode and embed `source`.
    pub fn render_url(&self, source: &str) -> Result<RenderUrl, TokenError> {
        let token = vizai_token::diagram_token(source, self.compression)?;
        Ok(self.url_for_token(&token))
    }

    /// Recover the diagram source from a render URL or a bare token.
    pub fn decode_source(&self, url_or_token: &str) -> Result<String, TokenError> {
        vizai_token::source_from_token(token_from_url(url_or_token), self.compression.framing)
    }
}

/// Map the config-file framing onto the token crate's framing.
pub fn framing_from_config(framing: DeflateFraming) -> Framing {
    match framing {
        DeflateFraming::Zlib => Framing::Zlib,
        DeflateFraming::Raw => Framing::Raw,
    }
}

/// Extract the token from a render URL. Bare tokens are returned unchanged.
pub fn token_from_url(url_or_token: &str) -> &str {
    let trimmed = url_or_token.trim();
    if !trimmed.contains("://") {
        return trimmed;
    }
    let without_suffix = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or(trimmed)
        .trim_end_matches('/');
    without_suffix
        .rsplit('/')
        .next()
        .unwrap_or(without_suffix)
}
