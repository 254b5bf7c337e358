pub mod app;
pub mod config;
pub mod constants;
pub mod document;
pub mod message;
pub mod text_wrapping;
