//! CLI interface for swing-shift
//!
//! Provides subcommands for:
//! - `replay`: run the full analysis over a CSV of daily bars
//! - `swings`: print confirmed swing points only
//! - `config`: show the effective configuration

mod replay;
mod swings;

pub use replay::ReplayArgs;
pub use swings::SwingsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "swing-shift")]
#[command(about = "Swing-point and momentum-shift signal detection over daily OHLC bars")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full analysis over a CSV of daily bars
    Replay(ReplayArgs),
    /// Print confirmed swing points only
    Swings(SwingsArgs),
    /// Show the effective configuration
    Config,
}
