//! Shared constants used across the application

/// Server used when neither the config file nor `--server` names one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Bot reply appended when a send fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Shown in place of the transcript while it is empty.
pub const EMPTY_TRANSCRIPT_PLACEHOLDER: &str = "How can I assist you?";

/// History entries longer than this are truncated in the sidebar.
pub const HISTORY_LABEL_MAX_CHARS: usize = 30;

/// Fixed width of the sidebar column, borders included.
pub const SIDEBAR_WIDTH: u16 = 38;

pub const UPLOAD_FAILED_NOTICE: &str = "Failed to upload file. Please try again.";
pub const DELETE_SUCCEEDED_NOTICE: &str = "Document deleted successfully!";
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete document. Please try again.";
pub const COPY_SUCCEEDED_NOTICE: &str = "Message copied to clipboard!";
pub const SEND_BUSY_NOTICE: &str = "Still waiting for the previous reply.";
pub const LIKED_NOTICE: &str = "Liked!";
pub const DISLIKED_NOTICE: &str = "Disliked!";

/// Notices disappear after this many seconds.
pub const NOTICE_TTL_SECS: u64 = 4;
