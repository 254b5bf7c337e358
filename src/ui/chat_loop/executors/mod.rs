//! Background work requested by [`AppCommand`]s.
//!
//! Each command runs on its own tokio task and reports its outcome back to
//! the event loop as an [`AppAction`](crate::core::app::AppAction). Nothing
//! here touches [`App`](crate::core::app::App) directly.

mod chat;
mod clipboard;
mod documents;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::ChatBackend;
use crate::core::app::{AppActionDispatcher, AppCommand};

#[derive(Clone)]
pub struct ExecutorContext {
    pub backend: Arc<dyn ChatBackend>,
    pub dispatcher: AppActionDispatcher,
}

impl ExecutorContext {
    pub fn new(backend: Arc<dyn ChatBackend>, dispatcher: AppActionDispatcher) -> Self {
        Self {
            backend,
            dispatcher,
        }
    }

    pub fn spawn(&self, command: AppCommand) -> JoinHandle<()> {
        match command {
            AppCommand::SendQuestion {
                request_id,
                request,
            } => chat::spawn_send(self.clone(), request_id, request),
            AppCommand::UploadDocument { path } => documents::spawn_upload(self.clone(), path),
            AppCommand::DeleteUserData => documents::spawn_delete(self.clone()),
            AppCommand::CopyToClipboard { text } => {
                clipboard::spawn_copy(self.dispatcher.clone(), text)
            }
        }
    }
}
