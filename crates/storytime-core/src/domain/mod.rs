//! Domain types shared by every storytime crate.

mod language;
mod profile;

pub use language::{Language, UnknownLanguage};
pub use profile::{Preferences, PreferencesUpdate, Profile};
