// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pico chat` command implementation.
//!
//! Interactive REPL around one [`ChatSession`] with a colored prompt and
//! readline history. `/attach <path>` sends a text or CSV file for
//! analysis, `/history` prints the transcript, `/quit` exits.

use std::path::Path;

use colored::Colorize;
use pico_agent::{CHAT_GREETING, ChatSession, SessionEvent, SessionState, TurnOutcome};
use pico_core::PicoError;
use pico_core::types::ChatRole;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::app::AppContext;

/// A parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput<'a> {
    Quit,
    History,
    Attach(&'a str),
    Message(&'a str),
    Empty,
}

pub fn parse_input(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => ShellInput::Empty,
        "/quit" | "/exit" => ShellInput::Quit,
        "/history" => ShellInput::History,
        _ => match trimmed.strip_prefix("/attach") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                ShellInput::Attach(rest.trim())
            }
            _ => ShellInput::Message(trimmed),
        },
    }
}

/// Runs the chat REPL until `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_chat(ctx: &AppContext) -> Result<(), PicoError> {
    let mut session = ctx.chat_session();

    // Tool rounds can take a while; show when one is running.
    let mut events = session.subscribe();
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let SessionEvent::StateChanged(SessionState::AwaitingToolResult) = event {
                println!("{}", "(요청하신 작업을 처리하고 있어요...)".dimmed());
            }
        }
    });

    let mut rl = DefaultEditor::new()
        .map_err(|e| PicoError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "pico chat".bold().green());
    println!("{CHAT_GREETING}");
    println!(
        "Type {} to attach a file, {} to exit.\n",
        "/attach <path>".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "pico".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match parse_input(&line) {
                    ShellInput::Empty => continue,
                    ShellInput::Quit => break,
                    ShellInput::History => print_history(&session),
                    ShellInput::Attach("") => {
                        eprintln!("{}: /attach <path>", "usage".yellow());
                    }
                    ShellInput::Attach(path) => {
                        let outcome = attach(&mut session, Path::new(path)).await;
                        print_outcome(&session, outcome);
                    }
                    ShellInput::Message(text) => {
                        let outcome = session.send_message(text).await;
                        print_outcome(&session, outcome);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }
    Ok(())
}

async fn attach(session: &mut ChatSession, path: &Path) -> TurnOutcome {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    debug!(file = %file_name, mime = %mime, "attaching file");

    match tokio::fs::read(path).await {
        Ok(bytes) => session.attach_file(&file_name, mime.essence_str(), &bytes).await,
        Err(e) => TurnOutcome::Rejected {
            reason: PicoError::Validation(format!("cannot read {}: {e}", path.display())),
        },
    }
}

fn print_outcome(session: &ChatSession, outcome: TurnOutcome) {
    match outcome {
        TurnOutcome::Replied { text } => println!("{text}\n"),
        TurnOutcome::ToolLimitReached { .. } | TurnOutcome::Failed { .. } => {
            // The session already appended the user-facing notice.
            if let Some(last) = session.transcript().last() {
                println!("{}\n", last.text().yellow());
            }
        }
        TurnOutcome::Rejected { reason } => match reason {
            PicoError::UnsupportedFile { .. } => {
                if let Some(last) = session.transcript().last() {
                    println!("{}\n", last.text().yellow());
                }
            }
            other => eprintln!("{}: {other}\n", "error".red()),
        },
    }
}

fn print_history(session: &ChatSession) {
    for message in session.transcript() {
        let who = match message.role {
            ChatRole::User => "you".cyan(),
            ChatRole::Assistant => "pico".green(),
        };
        println!("{who}: {}", message.text());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input("  "), ShellInput::Empty);
        assert_eq!(parse_input("/quit"), ShellInput::Quit);
        assert_eq!(parse_input("/exit"), ShellInput::Quit);
        assert_eq!(parse_input("/history"), ShellInput::History);
        assert_eq!(parse_input("/attach sales.csv"), ShellInput::Attach("sales.csv"));
        assert_eq!(parse_input("/attach"), ShellInput::Attach(""));
        assert_eq!(parse_input("/attachment"), ShellInput::Message("/attachment"));
        assert_eq!(parse_input("재고 알려줘"), ShellInput::Message("재고 알려줘"));
    }

    #[test]
    fn mime_guess_maps_text_and_csv() {
        let txt = mime_guess::from_path("notes.txt").first_or_octet_stream();
        let csv = mime_guess::from_path("sales.csv").first_or_octet_stream();
        let pdf = mime_guess::from_path("report.pdf").first_or_octet_stream();
        assert_eq!(txt.essence_str(), "text/plain");
        assert_eq!(csv.essence_str(), "text/csv");
        assert_eq!(pdf.essence_str(), "application/pdf");
    }
}
