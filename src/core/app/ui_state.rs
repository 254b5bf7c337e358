use std::time::{Duration, Instant};

use ratatui::prelude::Size;
use tui_textarea::{CursorMove, TextArea};

use crate::core::constants::NOTICE_TTL_SECS;
use crate::ui::transcript::TranscriptCache;

/// Current UI interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Composing a message in the input box.
    Typing,

    /// Browsing the sidebar's prompt history.
    HistorySelect {
        /// Index into the prompt history.
        index: usize,
    },

    /// Selecting a bot message to copy or rate.
    MessageSelect {
        /// Index into the transcript.
        index: usize,
    },

    /// Asking for the path of a document to upload.
    UploadPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short message shown over the input box, the terminal stand-in for an
/// alert dialog.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub set_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.set_at) >= Duration::from_secs(NOTICE_TTL_SECS)
    }
}

pub struct UiState {
    pub mode: UiMode,
    textarea: TextArea<'static>,
    path_input: TextArea<'static>,
    pub notice: Option<Notice>,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_from_bottom: u16,
    pub exit_requested: bool,
    pub last_term_size: Size,
    pub transcript_cache: TranscriptCache,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            mode: UiMode::Typing,
            textarea: TextArea::default(),
            path_input: TextArea::default(),
            notice: None,
            scroll_from_bottom: 0,
            exit_requested: false,
            last_term_size: Size::default(),
            transcript_cache: TranscriptCache::default(),
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn path_input(&self) -> &TextArea<'static> {
        &self.path_input
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn path_text(&self) -> String {
        self.path_input.lines().join("")
    }

    pub fn apply_path_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.path_input);
    }

    pub fn open_upload_prompt(&mut self) {
        self.path_input = TextArea::default();
        self.mode = UiMode::UploadPrompt;
    }

    pub fn close_upload_prompt(&mut self) {
        self.path_input = TextArea::default();
        self.mode = UiMode::Typing;
    }

    pub fn set_notice(&mut self, text: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            set_at: Instant::now(),
        });
    }

    /// The notice to draw, dropping it once it has been up long enough.
    pub fn visible_notice(&mut self, now: Instant) -> Option<&Notice> {
        if self.notice.as_ref().is_some_and(|notice| notice.is_expired(now)) {
            self.notice = None;
        }
        self.notice.as_ref()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_round_trips_multiline_text() {
        let mut ui = UiState::new();
        ui.set_input_text("first\nsecond");
        assert_eq!(ui.input_text(), "first\nsecond");
        assert_eq!(ui.textarea().cursor(), (1, 6));
        ui.clear_input();
        assert_eq!(ui.input_text(), "");
    }

    #[test]
    fn notices_expire() {
        let mut ui = UiState::new();
        ui.set_notice("Liked!", NoticeKind::Info);
        let set_at = ui.notice.as_ref().map(|notice| notice.set_at).expect("notice");
        assert!(ui.visible_notice(set_at).is_some());
        let later = set_at + Duration::from_secs(NOTICE_TTL_SECS);
        assert!(ui.visible_notice(later).is_none());
        assert!(ui.notice.is_none());
    }

    #[test]
    fn upload_prompt_resets_its_input() {
        let mut ui = UiState::new();
        ui.open_upload_prompt();
        ui.apply_path_edit(|input| {
            input.insert_str("~/notes.pdf");
        });
        assert_eq!(ui.path_text(), "~/notes.pdf");
        ui.close_upload_prompt();
        assert_eq!(ui.mode, UiMode::Typing);
        assert_eq!(ui.path_text(), "");
    }

    #[test]
    fn scrolling_saturates_at_bottom() {
        let mut ui = UiState::new();
        ui.scroll_down(3);
        assert_eq!(ui.scroll_from_bottom, 0);
        ui.scroll_up(5);
        ui.scroll_down(2);
        assert_eq!(ui.scroll_from_bottom, 3);
    }
}
