//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on config
//! fields so a partial YAML file fills in the rest.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

// ── Generator ──────────────────────────────────────────────────────────────

pub fn generator_endpoint() -> String {
    "http://localhost:5000/generate".to_string()
}

pub fn max_response_bytes() -> u64 {
    1024 * 1024
}

// ── Render ─────────────────────────────────────────────────────────────────

pub fn render_host() -> String {
    "kroki.io".to_string()
}

pub fn deflate_framing() -> crate::types::DeflateFraming {
    crate::types::DeflateFraming::Zlib
}

pub fn compression_level() -> u32 {
    9
}

// ── Logging ────────────────────────────────────────────────────────────────

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Warn
}
