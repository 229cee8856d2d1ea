//! Command-line interface for vizai.
//!
//! This module handles argument parsing, logging/config setup and dispatch.
//! Subcommand implementations live in the [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vizai_config::Config;

/// Exit code for a request that failed or was rejected.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for unusable configuration.
pub const EXIT_CONFIG: i32 = 2;

/// vizai - turn a topic into a rendered blockdiag diagram URL
#[derive(Parser, Debug)]
#[command(name = "vizai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Topic to visualize; multiple words are joined with spaces
    #[arg(value_name = "TOPIC")]
    pub topic: Vec<String>,

    /// Diagram-generation endpoint (overrides config and VIZAI_ENDPOINT)
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Render service host (overrides config and VIZAI_RENDER_HOST)
    #[arg(long, value_name = "HOST", global = true)]
    pub render_host: Option<String>,

    /// Config file to use instead of ~/.config/vizai/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Open the rendered diagram in the system browser
    #[arg(long, global = true)]
    pub open: bool,

    /// Set log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Encode a local blockdiag file (or stdin) into a render URL
    Encode {
        /// File containing the diagram source; reads stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print the diagram source carried by a render token or URL
    Decode {
        /// Bare token or full render URL
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Read topics line by line from stdin, one request per line
    Interactive,
}

impl Cli {
    /// The positional words as a single topic string.
    pub fn topic_text(&self) -> String {
        self.topic.join(" ")
    }

    /// Resolve the config: file (explicit or default), env, then CLI flags.
    ///
    /// Validation runs once, after every layer is applied.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_unvalidated(path)?,
            None => Config::load_unvalidated()?,
        };
        if let Some(endpoint) = &self.endpoint {
            config.generator.endpoint = endpoint.clone();
        }
        if let Some(host) = &self.render_host {
            config.render.host = host.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse arguments, set up logging and config, and run the chosen command.
///
/// Returns the process exit code.
pub fn process_cli() -> i32 {
    let cli = Cli::parse();
    run(cli)
}

/// Run an already-parsed command line.
pub fn run(cli: Cli) -> i32 {
    let cli_level = cli.log_level.map(LogLevelArg::to_level_filter);
    crate::debug::init_log_bridge(cli_level);
    log::info!("Starting vizai {}", crate::VERSION);

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vizai: configuration error: {e:#}");
            return EXIT_CONFIG;
        }
    };
    crate::debug::apply_config_level(cli_level, config.log_level.to_level_filter());

    let result = match &cli.command {
        Some(Commands::Encode { file }) => commands::encode_cli(&config, file.as_deref(), cli.open),
        Some(Commands::Decode { token }) => commands::decode_cli(&config, token),
        Some(Commands::Interactive) => commands::interactive_cli(&config, cli.open),
        None => commands::generate_cli(&config, &cli.topic_text(), cli.open),
    };

    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_FAILURE,
        Err(e) => {
            eprintln!("vizai: error: {e:#}");
            EXIT_FAILURE
        }
    }
}
