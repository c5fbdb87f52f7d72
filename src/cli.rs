//! Command-line interface for fourstack.

use clap::{Parser, Subcommand};

/// Fourstack - Connect Four core for a livestream community bot
#[derive(Parser, Debug)]
#[command(name = "fourstack")]
#[command(about = "Board-game dispatcher for a livestream community bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP dispatcher server
    Http {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Path to the bot configuration file
        #[arg(short, long, default_value = "fourstack.toml")]
        config: std::path::PathBuf,
    },
}
