//! The `Config` struct and its sections.
//!
//! Method groups live in sibling modules:
//! - `persistence`: load / save and path helpers
//! - `env_vars`: `${VAR}` substitution and `VIZAI_*` overrides
//! - `validation`: semantic checks run after loading

mod env_vars;
mod persistence;
mod validation;

pub use env_vars::{
    ALLOWED_ENV_VARS, ENV_ENDPOINT, ENV_RENDER_HOST, is_env_var_allowed, substitute_variables,
    substitute_variables_with_allowlist,
};

use crate::types::{DeflateFraming, LogLevel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration, stored as YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Diagram-generation endpoint settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Render service and token settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Log verbosity when neither `--log-level` nor `RUST_LOG` is given
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Resolve every `${VAR}` in the config file, not just allowlisted ones
    #[serde(default = "crate::defaults::bool_false")]
    pub allow_all_env_vars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            render: RenderConfig::default(),
            log_level: crate::defaults::log_level(),
            allow_all_env_vars: crate::defaults::bool_false(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.generator.endpoint = endpoint.into();
        self
    }

    pub fn with_render_host(mut self, host: impl Into<String>) -> Self {
        self.render.host = host.into();
        self
    }
}

/// Where topics are sent and how the response is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// URL that accepts `POST {"topic": ...}`
    #[serde(default = "crate::defaults::generator_endpoint")]
    pub endpoint: String,

    /// Global request timeout in seconds (`null` = transport default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Largest response body accepted from the endpoint
    #[serde(default = "crate::defaults::max_response_bytes")]
    pub max_response_bytes: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::defaults::generator_endpoint(),
            timeout_secs: None,
            max_response_bytes: crate::defaults::max_response_bytes(),
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Render service host and token encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Host (optionally `host:port`) of the Kroki-compatible render service
    #[serde(default = "crate::defaults::render_host")]
    pub host: String,

    /// Deflate container used inside tokens
    /// - zlib: header + Adler-32 trailer (default, what Kroki expects)
    /// - raw: bare deflate stream
    #[serde(default = "crate::defaults::deflate_framing")]
    pub framing: DeflateFraming,

    /// Deflate level 0-9
    #[serde(default = "crate::defaults::compression_level")]
    pub compression_level: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            host: crate::defaults::render_host(),
            framing: crate::defaults::deflate_framing(),
            compression_level: crate::defaults::compression_level(),
        }
    }
}
