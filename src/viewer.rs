//! Terminal presentation of request state.
//!
//! The viewer reads state and prints it: status lines go to the error stream,
//! the render URL alone goes to the output stream so it can be piped. It can
//! also hand the URL to the system browser, which fetches the rendered SVG.

use crate::orchestrator::RequestState;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalViewer {
    open_in_browser: bool,
}

impl TerminalViewer {
    pub fn new(open_in_browser: bool) -> Self {
        Self { open_in_browser }
    }

    /// Write `state` to the process's stdout/stderr.
    pub fn show(&self, state: &RequestState) {
        let stdout = io::stdout();
        let stderr = io::stderr();
        if let Err(e) = self.present(state, &mut stdout.lock(), &mut stderr.lock()) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Write `state` to the given streams. `Idle` prints nothing.
    pub fn present<O: Write, E: Write>(
        &self,
        state: &RequestState,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<()> {
        match state {
            RequestState::Idle => {}
            RequestState::Loading => writeln!(err, "Generating...")?,
            RequestState::Failed(message) => writeln!(err, "error: {}", message)?,
            RequestState::Success(url) => {
                writeln!(err, "Generated Diagram:")?;
                writeln!(out, "{}", url)?;
                out.flush()?;
                if self.open_in_browser {
                    self.open(url.as_str());
                }
            }
        }
        Ok(())
    }

    fn open(&self, url: &str) {
        log::info!("Opening {} in the system browser", url);
        if let Err(e) = open::that(url) {
            log::warn!("Failed to open browser for {}: {}", url, e);
        }
    }
}
