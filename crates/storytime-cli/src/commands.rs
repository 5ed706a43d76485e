//! Top-level subcommands.

use clap::Subcommand;
use storytime_core::Language;

use crate::profile_commands::ProfileCommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Manage listener profiles
    Profiles {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Show the stories, or the full text of one
    Stories {
        /// Print the full story in this language (es, en, fr or a full code)
        #[arg(short, long)]
        language: Option<Language>,
    },
    /// List narrator voices and playback speeds
    Voices,
    /// Open the interactive story player
    Listen {
        /// Profile id or name whose preferences to use and update
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Show the resolved data paths
    Paths,
}
