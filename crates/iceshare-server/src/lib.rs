//! Encrypt/decrypt endpoints, configuration and command handlers for `iceshare`.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use api::{router, AppState};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
