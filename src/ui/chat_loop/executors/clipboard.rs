use tokio::task::JoinHandle;
use tracing::warn;

use crate::core::app::{AppAction, AppActionDispatcher};
use crate::utils::clipboard::copy_to_clipboard;

/// Clipboard helpers are external processes; they run on the blocking pool.
pub fn spawn_copy(dispatcher: AppActionDispatcher, text: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
            .await
            .unwrap_or_else(|join_error| Err(join_error.to_string()));
        if let Err(reason) = &result {
            warn!(%reason, "copy to clipboard failed");
        }
        dispatcher.dispatch(AppAction::CopyFinished { result });
    })
}
