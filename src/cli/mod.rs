//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, resolves them against the
//! configuration file and runs either the interactive chat or one of the
//! TUI-less commands.

pub mod ask;
pub mod documents;
pub mod settings;


use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::api::{ApiError, HttpBackend};
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::ThemeMode;
use crate::utils::logging::init_file_logging;
use crate::utils::url::{is_http_url, normalize_base_url};

#[derive(Parser)]
#[command(name = "edubridge")]
#[command(version, about = "A terminal chat client for a document-aware study assistant")]
#[command(
    long_about = "Edubridge is a full-screen terminal chat interface for a question answering \
server. Upload a document and the server answers from it; without one it answers in general.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  PageUp/PageDown   Scroll the transcript\n\
  Ctrl+U            Upload a document\n\
  Ctrl+D            Delete the uploaded document\n\
  Ctrl+L            Clear the chat\n\
  Ctrl+T            Toggle light/dark theme\n\
  Ctrl+P            Pick a previous prompt to reuse\n\
  Ctrl+B            Select a reply to copy (c), like (l) or dislike (d)\n\
  Ctrl+C            Quit the application\n\n\
Configuration:\n\
  edubridge set <key> <value>   Keys: server-url, theme, request-timeout\n\
  edubridge set                 Show the current configuration"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the chat server (overrides the configured server-url)
    #[arg(short = 's', long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Write logs to the given file (filter with EDUBRIDGE_LOG)
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Theme to start with: dark or light (overrides the configured theme)
    #[arg(short = 't', long, global = true, value_name = "THEME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the reply
    Ask {
        /// The question; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, required = true)]
        question: Vec<String>,
        /// Let the server answer from the uploaded document
        #[arg(short = 'd', long)]
        use_document: bool,
    },
    /// Upload a document for the server to answer from
    Upload {
        /// Path of the document
        path: String,
    },
    /// Delete the uploaded document from the server
    DeleteDocument,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

/// Connection and display settings after flags override the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub server_url: String,
    pub theme_mode: ThemeMode,
    pub timeout: Option<Duration>,
}

impl SessionSettings {
    pub fn resolve(args: &Args, config: &Config) -> Result<Self, String> {
        let server_url = match args.server.as_deref() {
            Some(url) if is_http_url(url) => normalize_base_url(url),
            Some(url) => {
                return Err(format!(
                    "Invalid --server value \"{url}\": expected an http:// or https:// URL"
                ))
            }
            None => config.resolved_server_url(),
        };
        let theme_mode = match args.theme.as_deref() {
            Some(name) => ThemeMode::from_name(name).ok_or_else(|| {
                format!("Invalid --theme value \"{name}\": expected \"dark\" or \"light\"")
            })?,
            None => config.theme_mode(),
        };
        Ok(Self {
            server_url,
            theme_mode,
            timeout: config.request_timeout(),
        })
    }

    fn backend(&self) -> Result<HttpBackend, ApiError> {
        HttpBackend::new(self.server_url.clone(), self.timeout)
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Some(path) = args.log.as_deref() {
        init_file_logging(path)?;
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    // Config edits do not need a usable server setting
    match &args.command {
        Some(Commands::Set { key, value }) => {
            return settings::run_set(key.as_deref(), value.as_deref());
        }
        Some(Commands::Unset { key }) => return settings::run_unset(key),
        _ => {}
    }

    let config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "could not load configuration; using defaults");
        eprintln!("⚠️  {err}; using default settings");
        Config::default()
    });
    let settings = match SessionSettings::resolve(&args, &config) {
        Ok(settings) => settings,
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(2);
        }
    };

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(settings.server_url, settings.theme_mode, settings.timeout).await,
        Commands::Ask {
            question,
            use_document,
        } => {
            let backend = settings.backend()?;
            ask::run_ask(&backend, &question, use_document).await
        }
        Commands::Upload { path } => {
            let backend = settings.backend()?;
            documents::run_upload(&backend, &path).await
        }
        Commands::DeleteDocument => {
            let backend = settings.backend()?;
            documents::run_delete(&backend).await
        }
        Commands::Set { .. } | Commands::Unset { .. } => Ok(()),
    }
}
