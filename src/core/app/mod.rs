//! Application state owned by the chat event loop.
//!
//! [`App`] is mutated only by [`apply_actions`], which runs on the loop. Network
//! work happens elsewhere and reports back through [`AppActionDispatcher`].

pub mod actions;
pub mod conversation;
pub mod ui_state;


pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};
pub use conversation::{history_label, Conversation};
pub use ui_state::{Notice, NoticeKind, UiMode, UiState};

use crate::core::document::DocumentHandle;
use crate::ui::theme::{Theme, ThemeMode};

pub struct App {
    pub conversation: Conversation,
    pub document: Option<DocumentHandle>,
    pub is_deleting: bool,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub server_url: String,
    pub ui: UiState,
    pending_send: Option<u64>,
    next_request_id: u64,
}

impl App {
    pub fn new(theme_mode: ThemeMode, server_url: String) -> Self {
        Self {
            conversation: Conversation::new(),
            document: None,
            is_deleting: false,
            theme_mode,
            theme: Theme::for_mode(theme_mode),
            server_url,
            ui: UiState::new(),
            pending_send: None,
            next_request_id: 1,
        }
    }

    /// True strictly between a send being issued and its reply (or failure)
    /// being applied.
    pub fn is_bot_processing(&self) -> bool {
        self.pending_send.is_some()
    }

    pub fn pending_request_id(&self) -> Option<u64> {
        self.pending_send
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Marks a send as outstanding and returns its request id.
    pub fn begin_send(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_send = Some(id);
        id
    }

    /// Releases the busy flag if `request_id` is the outstanding send.
    /// Replies for any other id are stale and must be dropped.
    pub fn finish_send(&mut self, request_id: u64) -> bool {
        if self.pending_send == Some(request_id) {
            self.pending_send = None;
            true
        } else {
            false
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.theme = Theme::for_mode(self.theme_mode);
        self.ui.transcript_cache.invalidate();
    }

    /// Empties transcript and history. An outstanding send is not cancelled;
    /// its reply still lands in the cleared transcript.
    pub fn clear_chat(&mut self) {
        self.conversation.clear();
        self.ui.transcript_cache.invalidate();
        self.ui.scroll_to_bottom();
        if !matches!(self.ui.mode, UiMode::Typing | UiMode::UploadPrompt) {
            self.ui.mode = UiMode::Typing;
        }
    }
}
