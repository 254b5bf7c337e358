//! TUI-less "ask" command

use std::error::Error;

use ratatui::crossterm::terminal;
use ratatui::style::Style;
use tracing::{debug, warn};

use crate::api::{ApiError, ChatBackend, ChatRequest};
use crate::core::constants::FALLBACK_REPLY;
use crate::core::text_wrapping::wrap_lines;
use crate::ui::markdown::render_body;
use crate::ui::theme::Theme;

/// Width used when stdout is not a terminal.
const DEFAULT_WIDTH: usize = 80;

pub async fn run_ask(
    backend: &dyn ChatBackend,
    question: &[String],
    use_document: bool,
) -> Result<(), Box<dyn Error>> {
    let question = question.join(" ");
    if question.trim().is_empty() {
        eprintln!("Usage: edubridge ask <question>");
        std::process::exit(1);
    }

    let width = terminal::size()
        .ok()
        .map(|(w, _)| w as usize)
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH);

    match ask(backend, question, use_document).await {
        Ok(reply) => {
            for line in render_reply(&reply, width) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            println!("{FALLBACK_REPLY}");
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Sends one question and returns the raw reply text.
pub async fn ask(
    backend: &dyn ChatBackend,
    question: String,
    use_document: bool,
) -> Result<String, ApiError> {
    debug!(use_user_file = use_document, "sending one-off question");
    let request = ChatRequest {
        question,
        use_user_file: use_document,
    };
    match backend.ask(request).await {
        Ok(reply) => Ok(reply.response),
        Err(err) => {
            warn!(error = %err, "one-off question failed");
            Err(err)
        }
    }
}

/// The reply as plain text lines, rendered the same way the chat shows it.
pub fn render_reply(reply: &str, width: usize) -> Vec<String> {
    let lines = render_body(reply).lines(&Theme::dark(), Style::default());
    wrap_lines(&lines, width)
        .iter()
        .map(|line| line.to_string())
        .collect()
}
