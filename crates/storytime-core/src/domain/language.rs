//! Story languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A language a story can be narrated in.
///
/// Serialized as its BCP 47 code (`"es-ES"`, `"en-US"`, `"fr-FR"`), which is
/// also the prefix of every audio cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "es-ES")]
    Spanish,
    #[serde(rename = "en-US")]
    English,
    #[serde(rename = "fr-FR")]
    French,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Self; 3] = [Self::Spanish, Self::English, Self::French];

    /// BCP 47 code, e.g. `"es-ES"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Spanish => "es-ES",
            Self::English => "en-US",
            Self::French => "fr-FR",
        }
    }

    /// Name of the language in that language.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Spanish => "Español",
            Self::English => "English",
            Self::French => "Français",
        }
    }

    /// Flag glyph shown next to the language.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Spanish => "🇪🇸",
            Self::English => "🇬🇧",
            Self::French => "🇫🇷",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string names no supported language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown language '{0}' (expected one of: es-ES, en-US, fr-FR)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts the full code or its two-letter prefix, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| {
                let code = lang.code().to_ascii_lowercase();
                code == wanted || code.split('-').next() == Some(wanted.as_str())
            })
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
