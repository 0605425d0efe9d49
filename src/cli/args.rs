//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build living style guides from KSS comments
#[derive(Parser, Debug)]
#[command(name = "kss")]
#[command(about = "Build living style guides from KSS comments")]
#[command(version)]
pub struct Args {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the style guide for the given config as static files
    Build {
        /// Path to the config file
        config: PathBuf,

        /// Output directory (overrides build_dir)
        #[arg(short, long)]
        build_dir: Option<PathBuf>,

        /// Extension appended to page URLs, e.g. ".html"
        #[arg(long)]
        page_ext: Option<String>,
    },

    /// Serve the style guide for the given config
    Serve {
        /// Path to the config file
        config: PathBuf,

        /// Port or address:port to listen on
        #[arg(default_value = "127.0.0.1:8080")]
        address: String,
    },

    /// Create a new project in the given directory
    Create {
        /// Directory to create
        path: PathBuf,
    },

    /// Show version information
    Version,
}
