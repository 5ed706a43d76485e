//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Narrated stories for children, in the terminal.
#[derive(Parser)]
#[command(name = "storytime")]
#[command(about = "Listen to narrated children's stories")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Text-to-speech model to request
    #[arg(long, global = true, env = "STORYTIME_GEMINI_MODEL")]
    pub model: Option<String>,

    /// Base URL of the speech API
    #[arg(long = "base-url", global = true, env = "STORYTIME_GEMINI_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
