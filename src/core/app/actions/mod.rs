mod chat;
mod documents;
mod input;

use std::path::PathBuf;

use tokio::sync::mpsc;

use super::{App, NoticeKind};
use crate::api::ChatRequest;
use crate::core::document::DocumentHandle;

pub use documents::upload_succeeded_notice;

pub enum AppAction {
    SubmitMessage {
        text: String,
    },
    BotReplied {
        request_id: u64,
        text: String,
    },
    BotFailed {
        request_id: u64,
    },
    ClearChat,
    UploadDocument {
        path: String,
    },
    UploadSucceeded {
        handle: DocumentHandle,
    },
    UploadFailed,
    DeleteDocument,
    DeleteSucceeded,
    DeleteFailed,
    ReplayHistory {
        index: usize,
    },
    CopyMessage {
        index: usize,
    },
    CopyFinished {
        result: Result<(), String>,
    },
    RateMessage {
        index: usize,
        liked: bool,
    },
    ToggleTheme,
    SetNotice {
        text: String,
        kind: NoticeKind,
    },
    ClearNotice,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }
}

/// Side effects requested by an action, carried out by the chat loop's
/// executors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SendQuestion {
        request_id: u64,
        request: ChatRequest,
    },
    UploadDocument {
        path: PathBuf,
    },
    DeleteUserData,
    CopyToClipboard {
        text: String,
    },
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { .. }
        | AppAction::BotReplied { .. }
        | AppAction::BotFailed { .. }
        | AppAction::ClearChat => chat::handle_chat_action(app, action),

        AppAction::UploadDocument { .. }
        | AppAction::UploadSucceeded { .. }
        | AppAction::UploadFailed
        | AppAction::DeleteDocument
        | AppAction::DeleteSucceeded
        | AppAction::DeleteFailed => documents::handle_document_action(app, action),

        AppAction::ReplayHistory { .. }
        | AppAction::CopyMessage { .. }
        | AppAction::CopyFinished { .. }
        | AppAction::RateMessage { .. }
        | AppAction::ToggleTheme
        | AppAction::SetNotice { .. }
        | AppAction::ClearNotice => input::handle_input_action(app, action),
    }
}
