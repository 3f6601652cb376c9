//! Interactive console
//!
//! Reads one request per line and prints each envelope as pretty JSON.
//! Lines are read on a dedicated thread so a blocked read never keeps the
//! runtime alive after the session ends.

use std::io::{BufRead, Write};
use std::thread;

use colored::*;
use tokio::sync::mpsc;

use crate::domain::ResponseEnvelope;
use crate::error::Result;
use crate::llm::LlmClient;
use crate::orchestrator::RequestOrchestrator;
use crate::prompt::render;
use crate::provider::ToolProvider;
use crate::tools::ToolCatalog;

/// Inputs that end the interactive loop (case-insensitive)
pub const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

pub fn is_quit(input: &str) -> bool {
    QUIT_COMMANDS.iter().any(|c| input.eq_ignore_ascii_case(c))
}

/// Read lines from a blocking reader on a detached thread
///
/// The channel closes at end of input or on a read error.
pub fn spawn_line_reader<R>(reader: R) -> Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("Failed to read console input: {}", e);
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

/// Run the read loop until a quit command or end of input
///
/// Returns the number of requests processed.
pub async fn run_interactive<L, P, W>(
    orchestrator: &RequestOrchestrator<L, P>,
    lines: &mut mpsc::Receiver<String>,
    out: &mut W,
) -> Result<usize>
where
    L: LlmClient,
    P: ToolProvider,
    W: Write,
{
    let tool_count = orchestrator.session().catalog().len();
    writeln!(
        out,
        "{}",
        format!("Connected with {} tools. Type 'quit' to exit.", tool_count).green()
    )?;

    let mut processed = 0;

    loop {
        write!(out, "\n{} ", "You:".cyan().bold())?;
        out.flush()?;

        let Some(line) = lines.recv().await else {
            writeln!(out)?;
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_quit(input) {
            writeln!(out, "{}", "Goodbye!".yellow())?;
            break;
        }

        let envelope = orchestrator.process(input).await;
        print_envelope(out, &envelope)?;
        processed += 1;
    }

    log::info!("Console closed after {} requests", processed);
    Ok(processed)
}

/// Print an envelope under the FINAL RESULT banner
pub fn print_envelope<W: Write>(out: &mut W, envelope: &ResponseEnvelope) -> Result<()> {
    let rule = "=".repeat(60);
    let title = match envelope {
        ResponseEnvelope::Success { .. } => "FINAL RESULT".green().bold(),
        ResponseEnvelope::Error { .. } => "FINAL RESULT".red().bold(),
        ResponseEnvelope::NoAction { .. } => "FINAL RESULT".yellow().bold(),
    };

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", serde_json::to_string_pretty(envelope)?)?;
    Ok(())
}

/// Print the rendered catalog
pub fn print_catalog<W: Write>(out: &mut W, catalog: &ToolCatalog) -> Result<()> {
    writeln!(out, "{}", format!("Available tools ({}):", catalog.len()).cyan())?;
    writeln!(out, "{}", render(catalog))?;
    Ok(())
}
