//! Logging bridge for vizai.
//!
//! Routes every `log::info!()` etc. to `vizai_debug.log` in the system temp
//! directory, so log lines never mix with the URL printed on stdout. When
//! `RUST_LOG` is set, lines are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied after the config is loaded), then `warn`.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

struct LogBridge {
    file: Option<Mutex<File>>,
    mirror_to_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_to_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("vizai_debug.log")
}

/// Parse a `RUST_LOG` value. Accepts a bare level (`debug`) or a directive
/// list whose last `target=level` entry names a level.
pub fn parse_rust_log(value: &str) -> Option<log::LevelFilter> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(level) = log::LevelFilter::from_str(value) {
        return Some(level);
    }
    value
        .rsplit(',')
        .filter_map(|directive| directive.rsplit_once('=').map(|(_, level)| level))
        .find_map(|level| log::LevelFilter::from_str(level.trim()).ok())
}

/// Level chosen from the CLI flag and `RUST_LOG`, if either is present.
pub fn explicit_level(
    cli: Option<log::LevelFilter>,
    rust_log: Option<&str>,
) -> Option<log::LevelFilter> {
    cli.or_else(|| rust_log.and_then(parse_rust_log))
}

/// Install the logger. Safe to call more than once; later calls only adjust
/// the level.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = explicit_level(level, rust_log.as_deref()).unwrap_or(DEFAULT_LEVEL);

    let bridge = BRIDGE.get_or_init(|| {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok()
            .map(Mutex::new);
        LogBridge {
            file,
            mirror_to_stderr: rust_log.is_some(),
        }
    });

    // Err only means a logger is already installed
    let _ = log::set_logger(bridge);
    log::set_max_level(level);
}

/// Apply the config file's level unless the user already chose one.
pub fn apply_config_level(cli: Option<log::LevelFilter>, config_level: log::LevelFilter) {
    let rust_log = std::env::var("RUST_LOG").ok();
    if explicit_level(cli, rust_log.as_deref()).is_none() {
        log::set_max_level(config_level);
    }
}
