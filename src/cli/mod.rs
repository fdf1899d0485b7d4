//! CLI module for prompt-relay
//!
//! # Commands
//!
//! - `serve` - Start the relay server
//! - `config init` - Write an example configuration file
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! relay serve
//!
//! # Start on another port without the history sweeper
//! relay serve -p 8080 --no-sweeper
//! ```

pub mod config;
pub mod serve;

pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// prompt-relay - Text-generation relay service
#[derive(Parser, Debug)]
#[command(
    name = "relay",
    version,
    about = "HTTP relay forwarding prompts to a local text-generation backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the relay server
    Serve(ServeArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "RELAY_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "RELAY_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable the rate-limit history sweeper
    #[arg(long)]
    pub no_sweeper: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "relay.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}
