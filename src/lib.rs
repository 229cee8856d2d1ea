// Library exports for testing and potential library use
//
// Crate map:
//   - `vizai-token`   compress + URL-safe encode (pure)
//   - `vizai-client`  HTTP transport to the generation endpoint
//   - `vizai-config`  YAML config, env substitution, validation
//   - this crate      orchestration, render URLs, CLI, logging, viewer

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod error;
pub mod orchestrator;
pub mod render_url;
pub mod viewer;

pub use error::DiagramError;
pub use orchestrator::{
    Orchestrator, RejectReason, RequestState, StateHandle, StateView, Submission, Topic,
};
pub use render_url::{RenderTarget, RenderUrl};

pub use vizai_client as client;
pub use vizai_config as config;
pub use vizai_token as token;
