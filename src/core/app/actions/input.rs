use super::{App, AppAction, AppCommand};
use crate::core::app::{NoticeKind, UiMode};
use crate::core::constants::{COPY_SUCCEEDED_NOTICE, DISLIKED_NOTICE, LIKED_NOTICE};

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::ReplayHistory { index } => {
            // Fills the input only; the user still has to send it.
            if let Some(entry) = app.conversation.history_entry(index) {
                let entry = entry.to_string();
                app.ui.set_input_text(&entry);
                app.ui.mode = UiMode::Typing;
            }
            None
        }
        AppAction::CopyMessage { index } => app
            .conversation
            .message(index)
            .map(|message| AppCommand::CopyToClipboard {
                text: message.text.clone(),
            }),
        AppAction::CopyFinished { result } => {
            match result {
                Ok(()) => app.ui.set_notice(COPY_SUCCEEDED_NOTICE, NoticeKind::Info),
                Err(reason) => app
                    .ui
                    .set_notice(format!("Copy failed: {reason}"), NoticeKind::Error),
            }
            None
        }
        AppAction::RateMessage { index, liked } => {
            if app.conversation.message(index).is_some_and(|m| m.is_bot()) {
                let notice = if liked { LIKED_NOTICE } else { DISLIKED_NOTICE };
                app.ui.set_notice(notice, NoticeKind::Info);
            }
            None
        }
        AppAction::ToggleTheme => {
            app.toggle_theme();
            None
        }
        AppAction::SetNotice { text, kind } => {
            app.ui.set_notice(text, kind);
            None
        }
        AppAction::ClearNotice => {
            app.ui.notice = None;
            None
        }
        _ => unreachable!("non-input action routed to input handler"),
    }
}
