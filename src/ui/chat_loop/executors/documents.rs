use std::path::PathBuf;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ExecutorContext;
use crate::core::app::AppAction;
use crate::core::document::DocumentUpload;

/// Reads the file and uploads it. A file that cannot be read fails the
/// upload without contacting the server.
pub fn spawn_upload(ctx: ExecutorContext, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        let upload = match DocumentUpload::read(&path).await {
            Ok(upload) => upload,
            Err(error) => {
                warn!(path = %path.display(), %error, "could not read document");
                ctx.dispatcher.dispatch(AppAction::UploadFailed);
                return;
            }
        };

        let handle = upload.handle.clone();
        debug!(name = %handle.name, size = handle.size_bytes, "upload started");
        let action = match ctx.backend.upload_document(upload).await {
            Ok(()) => AppAction::UploadSucceeded { handle },
            Err(error) => {
                warn!(name = %handle.name, %error, "upload failed");
                AppAction::UploadFailed
            }
        };
        ctx.dispatcher.dispatch(action);
    })
}

pub fn spawn_delete(ctx: ExecutorContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("delete started");
        let action = match ctx.backend.delete_user_data().await {
            Ok(()) => AppAction::DeleteSucceeded,
            Err(error) => {
                warn!(%error, "delete failed");
                AppAction::DeleteFailed
            }
        };
        ctx.dispatcher.dispatch(action);
    })
}
