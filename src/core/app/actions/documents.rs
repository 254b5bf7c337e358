use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::core::app::NoticeKind;
use crate::core::constants::{DELETE_FAILED_NOTICE, DELETE_SUCCEEDED_NOTICE, UPLOAD_FAILED_NOTICE};
use crate::core::document::expand_user_path;

pub fn upload_succeeded_notice(name: &str) -> String {
    format!("Document \"{name}\" uploaded and processed successfully!")
}

pub(super) fn handle_document_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::UploadDocument { path } => {
            if path.trim().is_empty() {
                app.ui.set_notice("Enter the path of a file to upload.", NoticeKind::Info);
                return None;
            }
            app.ui.close_upload_prompt();
            let path = expand_user_path(&path);
            app.ui
                .set_notice(format!("Uploading {}...", path.display()), NoticeKind::Info);
            Some(AppCommand::UploadDocument { path })
        }
        AppAction::UploadSucceeded { handle } => {
            app.ui
                .set_notice(upload_succeeded_notice(&handle.name), NoticeKind::Info);
            app.document = Some(handle);
            None
        }
        AppAction::UploadFailed => {
            app.ui.set_notice(UPLOAD_FAILED_NOTICE, NoticeKind::Error);
            None
        }
        AppAction::DeleteDocument => {
            if !app.has_document() || app.is_deleting {
                debug!(
                    has_document = app.has_document(),
                    is_deleting = app.is_deleting,
                    "ignoring delete request"
                );
                return None;
            }
            app.is_deleting = true;
            Some(AppCommand::DeleteUserData)
        }
        AppAction::DeleteSucceeded => {
            app.is_deleting = false;
            app.document = None;
            app.ui.set_notice(DELETE_SUCCEEDED_NOTICE, NoticeKind::Info);
            None
        }
        AppAction::DeleteFailed => {
            app.is_deleting = false;
            app.ui.set_notice(DELETE_FAILED_NOTICE, NoticeKind::Error);
            None
        }
        _ => unreachable!("non-document action routed to document handler"),
    }
}
