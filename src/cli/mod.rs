//! CLI module for mcp-router - command-line interface and subcommands.
//!
//! With no subcommand the interactive console starts; `ask` answers a
//! single request and `tools` prints the provider's catalog.

pub mod commands;

pub use commands::Cli;
