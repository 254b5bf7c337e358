use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk configuration. Every field is optional so a missing or partial
/// file falls back to built-in defaults.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the chat server (e.g., "http://localhost:8080")
    pub server_url: Option<String>,
    /// Theme used at startup: "dark" or "light"
    pub theme: Option<String>,
    /// Per-request timeout in seconds; unset means no client-side timeout
    pub request_timeout_secs: Option<u64>,
}

/// Keys accepted by `edubridge set` and `edubridge unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ServerUrl,
    Theme,
    RequestTimeout,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::ServerUrl,
        ConfigKey::Theme,
        ConfigKey::RequestTimeout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ServerUrl => "server-url",
            ConfigKey::Theme => "theme",
            ConfigKey::RequestTimeout => "request-timeout",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(key.trim()))
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
