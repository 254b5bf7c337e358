use std::time::Duration;

use crate::core::config::data::{Config, ConfigKey};
use crate::core::config::io::ConfigError;
use crate::core::constants::DEFAULT_SERVER_URL;
use crate::ui::theme::ThemeMode;
use crate::utils::url::{is_http_url, normalize_base_url};

impl Config {
    pub fn resolved_server_url(&self) -> String {
        self.server_url
            .as_deref()
            .map(normalize_base_url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// Unknown theme names fall back to dark, the startup default.
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
            .as_deref()
            .and_then(ThemeMode::from_name)
            .unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.as_str(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match key {
            ConfigKey::ServerUrl => {
                if !is_http_url(value) {
                    return Err(invalid("expected an http:// or https:// URL"));
                }
                self.server_url = Some(normalize_base_url(value));
            }
            ConfigKey::Theme => {
                let mode = ThemeMode::from_name(value)
                    .ok_or_else(|| invalid("expected \"dark\" or \"light\""))?;
                self.theme = Some(mode.as_str().to_string());
            }
            ConfigKey::RequestTimeout => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| invalid("expected a whole number of seconds"))?;
                self.request_timeout_secs = Some(secs);
            }
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::ServerUrl => self.server_url = None,
            ConfigKey::Theme => self.theme = None,
            ConfigKey::RequestTimeout => self.request_timeout_secs = None,
        }
    }
}
