pub mod config;
pub mod error;

// Recipe catalog core
pub mod catalog;

// HTTP surfaces
pub mod api;
pub mod web;

// Command-line interface
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
