pub mod data;
pub mod defaults;
pub mod io;
pub mod printing;

#[cfg(test)]
pub mod tests;

pub use data::{path_display, Config, ConfigKey};
pub use io::ConfigError;
