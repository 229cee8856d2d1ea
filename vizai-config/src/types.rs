use serde::{Deserialize, Serialize};

/// Container around the deflate stream embedded in render tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeflateFraming {
    /// zlib header and Adler-32 trailer (what Kroki decodes)
    #[default]
    Zlib,
    /// Bare deflate stream
    Raw,
}

impl DeflateFraming {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            DeflateFraming::Zlib => "zlib",
            DeflateFraming::Raw => "raw",
        }
    }
}

/// Log verbosity stored in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
