//! TUI-less document commands

use std::error::Error;

use tracing::warn;

use crate::api::ChatBackend;
use crate::core::app::actions::upload_succeeded_notice;
use crate::core::constants::{
    DELETE_FAILED_NOTICE, DELETE_SUCCEEDED_NOTICE, UPLOAD_FAILED_NOTICE,
};
use crate::core::document::{expand_user_path, DocumentUpload};

/// Reads `path` and uploads it. `Ok` and `Err` both carry the message for
/// the user; a file that cannot be read never reaches the server.
pub async fn upload(backend: &dyn ChatBackend, path: &str) -> Result<String, String> {
    let path = expand_user_path(path);
    let upload = match DocumentUpload::read(&path).await {
        Ok(upload) => upload,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read document");
            return Err(format!("{UPLOAD_FAILED_NOTICE} ({err})"));
        }
    };

    let name = upload.handle.name.clone();
    match backend.upload_document(upload).await {
        Ok(()) => Ok(upload_succeeded_notice(&name)),
        Err(err) => {
            warn!(error = %err, "document upload failed");
            Err(UPLOAD_FAILED_NOTICE.to_string())
        }
    }
}

pub async fn delete(backend: &dyn ChatBackend) -> Result<String, String> {
    match backend.delete_user_data().await {
        Ok(()) => Ok(DELETE_SUCCEEDED_NOTICE.to_string()),
        Err(err) => {
            warn!(error = %err, "document delete failed");
            Err(DELETE_FAILED_NOTICE.to_string())
        }
    }
}

pub async fn run_upload(backend: &dyn ChatBackend, path: &str) -> Result<(), Box<dyn Error>> {
    report(upload(backend, path).await)
}

pub async fn run_delete(backend: &dyn ChatBackend) -> Result<(), Box<dyn Error>> {
    report(delete(backend).await)
}

fn report(outcome: Result<String, String>) -> Result<(), Box<dyn Error>> {
    match outcome {
        Ok(message) => {
            println!("✅ {message}");
            Ok(())
        }
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
}
