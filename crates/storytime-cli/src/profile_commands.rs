//! `storytime profiles` subcommands.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List all profiles
    List,
    /// Create a profile with default preferences
    Create {
        /// Display name
        name: String,
        /// Avatar glyph: 🐶 🐱 🦊 🐻 🐼 🐰 🦁 🐯
        #[arg(long, default_value = "🐶")]
        avatar: String,
    },
    /// Remove a profile by id or name
    Remove {
        /// Profile id or name
        identifier: String,
    },
}
