//! CLI command definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mcp-router - route natural-language requests to MCP tools
#[derive(Parser, Debug)]
#[command(name = "mcp-router")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// .env file to load before reading the API key
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// MCP server script, replacing the configured provider arguments
    #[arg(long, global = true)]
    pub server: Option<PathBuf>,

    /// Model name, replacing the configured one
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route a single request and print its envelope
    Ask {
        /// Request text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the provider's tool catalog
    Tools,
}

impl Commands {
    /// Request text for `ask`, words joined by spaces
    pub fn ask_text(&self) -> Option<String> {
        match self {
            Commands::Ask { text } => Some(text.join(" ")),
            Commands::Tools => None,
        }
    }
}
