use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{ApiError, ChatBackend, HttpBackend};

pub const CHAT_ENDPOINT: &str = "chat";
pub const UPLOAD_ENDPOINT: &str = "upload";
pub const DELETE_USER_DATA_ENDPOINT: &str = "delete-user-data";

/// Multipart field name the server reads the uploaded file from.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub use_user_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}
