use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::{ApiError, ChatBackend, ChatReply, ChatRequest};
use crate::core::app::App;
use crate::core::document::DocumentUpload;
use crate::ui::theme::ThemeMode;

pub fn create_test_app() -> App {
    App::new(ThemeMode::Dark, "http://localhost:8080".to_string())
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

/// One upload as the backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A [`ChatBackend`] that answers from queued results and records every
/// call. An empty queue answers with a server error.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, ApiError>>>,
    uploads: Mutex<VecDeque<Result<(), ApiError>>>,
    deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    pub questions: Mutex<Vec<ChatRequest>>,
    pub uploaded: Mutex<Vec<RecordedUpload>>,
    pub delete_calls: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: Result<&str, ApiError>) -> Self {
        lock(&self.replies).push_back(reply.map(str::to_string));
        self
    }

    pub fn with_upload(self, result: Result<(), ApiError>) -> Self {
        lock(&self.uploads).push_back(result);
        self
    }

    pub fn with_delete(self, result: Result<(), ApiError>) -> Self {
        lock(&self.deletes).push_back(result);
        self
    }

    pub fn question_count(&self) -> usize {
        lock(&self.questions).len()
    }

    pub fn upload_count(&self) -> usize {
        lock(&self.uploaded).len()
    }

    pub fn delete_count(&self) -> usize {
        *lock(&self.delete_calls)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn ask(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        lock(&self.questions).push(request);
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
            .map(|response| ChatReply { response })
    }

    async fn upload_document(&self, upload: DocumentUpload) -> Result<(), ApiError> {
        lock(&self.uploaded).push(RecordedUpload {
            name: upload.handle.name,
            bytes: upload.bytes,
        });
        lock(&self.uploads)
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }

    async fn delete_user_data(&self) -> Result<(), ApiError> {
        *lock(&self.delete_calls) += 1;
        lock(&self.deletes)
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }
}
