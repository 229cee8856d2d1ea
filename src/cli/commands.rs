//! Subcommand implementations.
//!
//! Each handler returns `Ok(true)` on success, `Ok(false)` when the request
//! ran but did not produce a diagram (the message has already been printed),
//! and `Err` for local failures such as an unreadable input file.

use crate::orchestrator::{Orchestrator, RequestState, Submission};
use crate::render_url::{RenderTarget, RenderUrl};
use crate::viewer::TerminalViewer;
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use vizai_client::GenerationTransport;
use vizai_config::Config;

/// Words that end an interactive session.
const QUIT_WORDS: &[&str] = &["exit", "quit", ":q"];

fn orchestrator(config: &Config, open: bool) -> Orchestrator {
    let viewer = TerminalViewer::new(open);
    Orchestrator::from_config(config).with_observer(move |state| viewer.show(state))
}

/// Generate a diagram for one topic.
pub fn generate_cli(config: &Config, topic: &str, open: bool) -> Result<bool> {
    let orchestrator = orchestrator(config, open);
    Ok(report(orchestrator.submit(topic)))
}

/// Encode a local diagram file, or stdin when `file` is `None`.
pub fn encode_cli(config: &Config, file: Option<&Path>, open: bool) -> Result<bool> {
    let source = read_source(file, io::stdin().lock())?;
    let url = encode_source(config, &source)?;
    TerminalViewer::new(open).show(&RequestState::Success(url));
    Ok(true)
}

/// Read diagram source from `file`, falling back to `stdin`.
pub fn read_source(file: Option<&Path>, mut stdin: impl Read) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read diagram source from {}", path.display())),
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read diagram source from stdin")?;
            Ok(buf)
        }
    }
}

/// Turn a local diagram source into its render URL.
pub fn encode_source(config: &Config, source: &str) -> Result<RenderUrl> {
    if source.trim().is_empty() {
        bail!("diagram source is empty");
    }
    let url = RenderTarget::from_config(&config.render)
        .render_url(source)
        .context("Failed to encode diagram")?;
    log::info!("Encoded local diagram: {}", url);
    Ok(url)
}

/// Print the diagram source inside a token or render URL.
pub fn decode_cli(config: &Config, token: &str) -> Result<bool> {
    decode_to(config, token, &mut io::stdout().lock())?;
    Ok(true)
}

/// Write the decoded source of `token` to `out`.
pub fn decode_to(config: &Config, token: &str, out: &mut impl Write) -> Result<()> {
    let source = RenderTarget::from_config(&config.render)
        .decode_source(token)
        .context("Failed to decode render token")?;
    writeln!(out, "{}", source)?;
    Ok(())
}

/// Read topics from stdin until EOF or a quit word.
///
/// Returns `Ok(true)` if the last completed request succeeded.
pub fn interactive_cli(config: &Config, open: bool) -> Result<bool> {
    let orchestrator = orchestrator(config, open);
    interactive_session(&orchestrator, io::stdin().lock(), &mut io::stderr().lock())
}

/// Submit one topic per line of `input`, writing the prompt to `prompt_out`.
///
/// Blank lines are skipped and do not change the result.
pub fn interactive_session<T: GenerationTransport>(
    orchestrator: &Orchestrator<T>,
    input: impl BufRead,
    prompt_out: &mut impl Write,
) -> Result<bool> {
    let mut last_ok = true;

    prompt(prompt_out)?;
    for line in input.lines() {
        let line = line.context("Failed to read topic from stdin")?;
        if QUIT_WORDS.contains(&line.trim()) {
            break;
        }
        match orchestrator.submit(&line) {
            Submission::Rejected(reason) => log::debug!("Skipped input: {}", reason),
            submission => last_ok = report(submission),
        }
        prompt(prompt_out)?;
    }
    Ok(last_ok)
}

fn prompt(out: &mut impl Write) -> Result<()> {
    write!(out, "topic> ")?;
    out.flush()?;
    Ok(())
}

/// Print rejections (completed states are printed by the viewer) and map to success.
fn report(submission: Submission) -> bool {
    match submission {
        Submission::Rejected(reason) => {
            eprintln!("error: {}", reason);
            false
        }
        Submission::Completed(state) => state.render_url().is_some(),
    }
}
