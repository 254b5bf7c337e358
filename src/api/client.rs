use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tracing::debug;

use super::{
    ChatReply, ChatRequest, CHAT_ENDPOINT, DELETE_USER_DATA_ENDPOINT, UPLOAD_ENDPOINT,
    UPLOAD_FIELD,
};
use crate::core::document::DocumentUpload;
use crate::utils::url::construct_api_url;

/// Failures talking to the chat server. The UI collapses all of them into a
/// single user-facing message; the variants exist for logs and the CLI.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    Transport(reqwest::Error),

    /// The server answered with a non-2xx status.
    Status { status: StatusCode, body: String },

    /// A 2xx response whose body was not the expected JSON.
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "request failed: {err}"),
            ApiError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "server returned {status}")
                } else {
                    write!(f, "server returned {status}: {body}")
                }
            }
            ApiError::Decode(err) => write!(f, "unexpected response body: {err}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            ApiError::Status { .. } => None,
            ApiError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

/// The three calls the client makes against the server.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, request: ChatRequest) -> Result<ChatReply, ApiError>;

    async fn upload_document(&self, upload: DocumentUpload) -> Result<(), ApiError>;

    /// The server keeps user data out of band, so the call carries no
    /// identifier.
    async fn delete_user_data(&self) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        construct_api_url(&self.base_url, path)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<no body>".to_string());
    Err(ApiError::Status { status, body })
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn ask(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        debug!(
            use_user_file = request.use_user_file,
            question_len = request.question.len(),
            "Sending chat question"
        );
        let response = self
            .client
            .post(self.endpoint(CHAT_ENDPOINT))
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str::<ChatReply>(&body).map_err(ApiError::Decode)
    }

    async fn upload_document(&self, upload: DocumentUpload) -> Result<(), ApiError> {
        let DocumentUpload { handle, bytes } = upload;
        debug!(name = %handle.name, size = handle.size_bytes, "Uploading document");
        let part = Part::bytes(bytes).file_name(handle.name);
        let form = Form::new().part(UPLOAD_FIELD, part);
        let response = self
            .client
            .post(self.endpoint(UPLOAD_ENDPOINT))
            .multipart(form)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_user_data(&self) -> Result<(), ApiError> {
        debug!("Deleting uploaded user data");
        let response = self
            .client
            .post(self.endpoint(DELETE_USER_DATA_ENDPOINT))
            .header("Content-Type", "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
