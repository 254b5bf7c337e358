//! Edubridge is a full-screen terminal client for a document-aware question
//! answering server.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state (the transcript, prompt history, the uploaded
//!   document and the busy flags), configuration, and the actions that mutate
//!   state.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`api`] defines the server payloads and the HTTP client behind the
//!   [`api::ChatBackend`] trait.
//! - [`utils`] holds clipboard, logging and URL helpers.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions or runs a single TUI-less command.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
