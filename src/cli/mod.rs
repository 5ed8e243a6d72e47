//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `schema` - Create missing tables

pub mod args;

pub use args::{Cli, Commands};
