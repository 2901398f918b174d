//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chat-relay: web chat gateway for automation webhooks
///
/// Serves a chat page and relays messages and file uploads to
/// external webhooks, returning their replies to the browser.
#[derive(Debug, Default, Parser)]
#[command(name = "chat-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "CHAT_RELAY_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// HTML page served at `/`
    #[arg(long = "index-file")]
    pub index_file: Option<PathBuf>,

    /// Directory for temporary upload data
    #[arg(long = "upload-dir")]
    pub upload_dir: Option<PathBuf>,

    /// Webhook receiving chat messages
    #[arg(long = "message-url", env = "N8N_WEBHOOK_URL")]
    pub message_url: Option<String>,

    /// Webhook receiving file uploads
    #[arg(long = "file-url", env = "N8N_FILE_WEBHOOK_URL")]
    pub file_url: Option<String>,

    /// Webhook timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum upload size in bytes
    #[arg(long = "max-file-size")]
    pub max_file_size: Option<usize>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for chat-relay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "chat-relay.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
