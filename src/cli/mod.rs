//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `indexes` - Create MongoDB indexes

pub mod args;

pub use args::{Cli, Commands};
