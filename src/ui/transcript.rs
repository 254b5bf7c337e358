//! Transcript layout: captions, bubbles and the typing indicator, wrapped to
//! the width of the transcript pane.

use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};

use crate::core::app::{App, UiMode};
use crate::core::message::Message;
use crate::core::text_wrapping::{wrap_line, wrap_lines};
use crate::ui::markdown::render_message_lines;
use crate::ui::theme::{Theme, ThemeMode};

/// Caption of the bubble shown while a reply is outstanding.
pub const TYPING_CAPTION: &str = "Bot • Typing...";

/// Wrapped body lines per message.
///
/// Messages never change once appended, so entries stay valid until the
/// theme or the pane width changes, or the transcript is cleared.
#[derive(Debug, Default)]
pub struct TranscriptCache {
    key: Option<(ThemeMode, usize)>,
    bodies: Vec<Vec<Line<'static>>>,
}

impl TranscriptCache {
    pub fn invalidate(&mut self) {
        self.key = None;
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn bodies(
        &mut self,
        messages: &[Message],
        theme_mode: ThemeMode,
        theme: &Theme,
        width: usize,
    ) -> &[Vec<Line<'static>>] {
        let key = Some((theme_mode, width));
        if self.key != key || self.bodies.len() > messages.len() {
            self.bodies.clear();
            self.key = key;
        }
        for message in &messages[self.bodies.len()..] {
            let body = bubble_body(message, theme);
            self.bodies.push(wrap_lines(&body, bubble_width(width)));
        }
        &self.bodies
    }
}

/// Bubbles take at most four fifths of the pane, like chat bubbles do.
pub fn bubble_width(pane_width: usize) -> usize {
    (pane_width * 4 / 5).max(10).min(pane_width)
}

fn bubble_body(message: &Message, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = render_message_lines(message, theme);
    if lines.is_empty() {
        lines.push(Line::default());
    }
    if message.is_user() {
        for line in &mut lines {
            line.alignment = Some(Alignment::Right);
        }
    }
    lines
}

/// All transcript rows for the current state, already wrapped to `width`.
pub fn build_transcript_lines(app: &mut App, width: usize) -> Vec<Line<'static>> {
    let selected = match app.ui.mode {
        UiMode::MessageSelect { index } => Some(index),
        _ => None,
    };
    let theme = &app.theme;
    let messages = app.conversation.messages();
    let bodies = app
        .ui
        .transcript_cache
        .bodies(messages, app.theme_mode, theme, width);

    let mut lines = Vec::new();
    for (index, (message, body)) in messages.iter().zip(bodies).enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        let mut caption_style = theme.caption_style;
        let mut caption = message.caption();
        if selected == Some(index) {
            caption_style = caption_style.patch(theme.selection_style);
            caption = format!("▶ {caption}");
        }
        let mut caption_line = Line::from(Span::styled(caption, caption_style));
        if message.is_user() {
            caption_line.alignment = Some(Alignment::Right);
        }
        lines.extend(wrap_line(&caption_line, width));
        lines.extend(body.iter().cloned());
    }

    if app.is_bot_processing() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            TYPING_CAPTION,
            theme.caption_style,
        )));
    }

    lines
}
