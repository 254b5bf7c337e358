//! Diagnostic logging.
//!
//! The TUI owns the terminal, so diagnostics go to the file given with
//! `--log`. Without it no subscriber is installed and `tracing` macros are
//! no-ops.

use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `edubridge=debug`.
pub const LOG_FILTER_ENV: &str = "EDUBRIDGE_LOG";

const DEFAULT_FILTER: &str = "info";

pub fn init_file_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = open_log_file(path)?;
    let directive = filter_directive(std::env::var(LOG_FILTER_ENV).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn filter_directive(env_value: Option<String>) -> String {
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn log_file_is_created_with_parents_and_appended() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("logs").join("edubridge.log");

        let mut file = open_log_file(&path).expect("open");
        writeln!(file, "first").expect("write");
        drop(file);
        let mut file = open_log_file(&path).expect("reopen");
        writeln!(file, "second").expect("write");

        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn installed_subscriber_writes_to_the_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("edubridge.log");

        init_file_logging(&path).expect("first install succeeds");
        tracing::warn!(request_id = 7, "reply dropped");
        let contents = fs::read_to_string(&path).expect("read");
        assert!(contents.contains("reply dropped"), "{contents}");
        assert!(contents.contains("request_id=7"), "{contents}");

        assert!(init_file_logging(&path).is_err());
    }

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(filter_directive(None), "info");
        assert_eq!(filter_directive(Some("  ".to_string())), "info");
        assert_eq!(
            filter_directive(Some(" edubridge=debug ".to_string())),
            "edubridge=debug"
        );
    }
}
