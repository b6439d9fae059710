pub mod cli;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod registry;

pub use error::{Error, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
