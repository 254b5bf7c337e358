//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop, key bindings and the executors that run
//!   network and clipboard work off the loop.
//! - [`renderer`] and [`transcript`]: frame composition.
//! - [`markdown`]: the sanitization boundary and markup-to-terminal rendering.
//! - [`theme`]: the dark and light palettes.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns the state itself and how actions change it.

pub mod chat_loop;
pub mod markdown;
pub mod renderer;
pub mod theme;
pub mod transcript;
