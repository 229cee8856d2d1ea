//! Configuration system for vizai.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - Generator endpoint and transport limits
//! - Render host and token compression settings
//! - `${VAR}` substitution in the raw YAML, restricted to an allowlist
//! - `VIZAI_*` environment overrides and semantic validation

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::{Config, GeneratorConfig, RenderConfig, substitute_variables};
pub use error::ConfigError;
pub use types::{DeflateFraming, LogLevel};
