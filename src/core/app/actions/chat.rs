use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::api::ChatRequest;
use crate::core::app::NoticeKind;
use crate::core::constants::{FALLBACK_REPLY, SEND_BUSY_NOTICE};

pub(super) fn handle_chat_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { text } => submit_message(app, text),
        AppAction::BotReplied { request_id, text } => {
            if app.finish_send(request_id) {
                app.conversation.push_bot(text);
                app.ui.scroll_to_bottom();
            } else {
                debug!(request_id, "dropping reply for a send that is no longer outstanding");
            }
            None
        }
        AppAction::BotFailed { request_id } => {
            if app.finish_send(request_id) {
                app.conversation.push_bot(FALLBACK_REPLY);
                app.ui.scroll_to_bottom();
            } else {
                debug!(request_id, "dropping failure for a send that is no longer outstanding");
            }
            None
        }
        AppAction::ClearChat => {
            app.clear_chat();
            None
        }
        _ => unreachable!("non-chat action routed to chat handler"),
    }
}

fn submit_message(app: &mut App, text: String) -> Option<AppCommand> {
    if text.trim().is_empty() {
        return None;
    }
    if app.is_bot_processing() {
        app.ui.set_notice(SEND_BUSY_NOTICE, NoticeKind::Info);
        return None;
    }

    // Decided now, not when the app started: a document uploaded or deleted
    // since then counts.
    let use_user_file = app.has_document();

    if app.ui.input_text() == text {
        app.ui.clear_input();
    }
    app.conversation.push_user(text.clone());
    app.ui.scroll_to_bottom();
    let request_id = app.begin_send();

    Some(AppCommand::SendQuestion {
        request_id,
        request: ChatRequest {
            question: text,
            use_user_file,
        },
    })
}
