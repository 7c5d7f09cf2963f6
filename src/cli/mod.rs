// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "greenspoon")]
#[command(about = "Green Spoon - local farmers' recipe catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search the catalog from the terminal
    Search {
        /// Search query (empty lists every recipe)
        #[arg(default_value = "")]
        query: String,

        /// Page of results to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Check a dataset file and report rejected records
    Validate {
        /// Path to a recipes JSON file
        path: PathBuf,
    },
}
