//! `edubridge set` and `edubridge unset`

use std::error::Error;

use crate::core::config::{Config, ConfigKey};

fn unknown_key_message(key: &str) -> String {
    let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
    format!("Unknown config key: {key} (expected one of: {})", known.join(", "))
}

/// Applies `set <key> <value>` to `config` and returns the confirmation.
pub fn apply_set(config: &mut Config, key: &str, value: &[String]) -> Result<String, String> {
    let key = ConfigKey::parse(key).ok_or_else(|| unknown_key_message(key))?;
    let value = value.join(" ");
    config
        .set_value(key, &value)
        .map_err(|err| err.to_string())?;
    Ok(format!("Set {} to: {}", key.as_str(), value.trim()))
}

/// Applies `unset <key>` to `config` and returns the confirmation.
pub fn apply_unset(config: &mut Config, key: &str) -> Result<String, String> {
    let key = ConfigKey::parse(key).ok_or_else(|| unknown_key_message(key))?;
    config.unset_value(key);
    Ok(format!("Unset {}", key.as_str()))
}

pub fn run_set(key: Option<&str>, value: Option<&[String]>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    let (key, value) = match (key, value) {
        (Some(key), Some(value)) if !value.is_empty() => (key, value),
        _ => {
            config.print_all();
            return Ok(());
        }
    };

    match apply_set(&mut config, key, value) {
        Ok(message) => {
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
}

pub fn run_unset(key: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match apply_unset(&mut config, key) {
        Ok(message) => {
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeMode;

    fn words(value: &str) -> Vec<String> {
        value.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn set_updates_known_keys() {
        let mut config = Config::default();
        let message =
            apply_set(&mut config, "server-url", &words("https://edu.example.com/")).expect("set");
        assert_eq!(message, "Set server-url to: https://edu.example.com/");
        assert_eq!(config.resolved_server_url(), "https://edu.example.com");

        apply_set(&mut config, "THEME", &words("light")).expect("set theme");
        assert_eq!(config.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        let err = apply_set(&mut config, "colour", &words("red")).expect_err("unknown key");
        assert!(err.contains("server-url, theme, request-timeout"));

        assert!(apply_set(&mut config, "request-timeout", &words("soon")).is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unset_clears_the_key() {
        let mut config = Config {
            theme: Some("light".to_string()),
            ..Config::default()
        };
        assert_eq!(apply_unset(&mut config, "theme"), Ok("Unset theme".to_string()));
        assert_eq!(config.theme, None);
        assert!(apply_unset(&mut config, "nope").is_err());
    }
}
