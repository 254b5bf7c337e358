//! Bot reply rendering.
//!
//! A reply that already looks like markup is sanitized and rendered as-is;
//! anything else is treated as GitHub-flavored Markdown, converted to HTML
//! and sanitized with the same policy. The terminal lines are always built
//! from the sanitized HTML, so nothing reaches the screen without passing
//! the sanitizer.

mod html;
mod lines;
mod render;
mod sanitize;


use ratatui::style::Style;
use ratatui::text::Line;

use crate::core::message::Message;
use crate::ui::theme::Theme;

pub use sanitize::sanitize_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// The reply contained tag-like markup and was sanitized directly.
    Html,
    /// The reply was converted from Markdown, then sanitized.
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub format: BodyFormat,
    /// Sanitized HTML, safe to hand to any markup consumer.
    pub html: String,
}

impl RenderedBody {
    pub fn lines(&self, theme: &Theme, base: Style) -> Vec<Line<'static>> {
        html::markup_lines(&self.html, theme, base)
    }
}

/// True when `text` contains something shaped like a tag: a `<`, at least
/// one character other than `>`, then a `>`.
pub fn contains_markup(text: &str) -> bool {
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(0) => rest = after,
            Some(_) => return true,
            None => return false,
        }
    }
    false
}

pub fn render_body(text: &str) -> RenderedBody {
    if contains_markup(text) {
        RenderedBody {
            format: BodyFormat::Html,
            html: sanitize_html(text),
        }
    } else {
        RenderedBody {
            format: BodyFormat::Markdown,
            html: sanitize_html(&render::markdown_to_html(text)),
        }
    }
}

/// Lines for one transcript entry. User text is shown verbatim; bot text goes
/// through [`render_body`].
pub fn render_message_lines(message: &Message, theme: &Theme) -> Vec<Line<'static>> {
    if message.is_user() {
        message
            .text
            .lines()
            .map(|line| Line::styled(line.replace('\t', "    "), theme.user_bubble_style))
            .collect()
    } else {
        render_body(&message.text).lines(theme, theme.bot_bubble_style)
    }
}
