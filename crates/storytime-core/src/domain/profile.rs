//! Listener profiles and their narration preferences.

use serde::{Deserialize, Serialize};

use super::language::Language;
use crate::stories::DEFAULT_VOICE;

/// Narration preferences remembered per profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub language: Language,
    pub playback_rate: f32,
    pub voice: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::Spanish,
            playback_rate: 1.0,
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

/// A listener profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub preferences: Preferences,
}

/// Partial update of [`Preferences`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesUpdate {
    pub language: Option<Language>,
    pub playback_rate: Option<f32>,
    pub voice: Option<String>,
}

impl PreferencesUpdate {
    /// True when the update carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.language.is_none() && self.playback_rate.is_none() && self.voice.is_none()
    }

    /// Apply the update in place.
    pub fn apply_to(&self, prefs: &mut Preferences) {
        if let Some(language) = self.language {
            prefs.language = language;
        }
        if let Some(rate) = self.playback_rate {
            prefs.playback_rate = rate;
        }
        if let Some(ref voice) = self.voice {
            prefs.voice.clone_from(voice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preferences_are_spanish_puck_normal_speed() {
        let prefs = Preferences::default();
        assert_eq!(prefs.language, Language::Spanish);
        assert_eq!(prefs.voice, "Puck");
        assert!((prefs.playback_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn profile_json_uses_camel_case() {
        let profile = Profile {
            id: "1700000000000".to_string(),
            name: "Lucía".to_string(),
            avatar: "🦊".to_string(),
            preferences: Preferences::default(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["preferences"]["playbackRate"], 1.0);
        assert_eq!(json["preferences"]["language"], "es-ES");
        assert_eq!(json["preferences"]["voice"], "Puck");
    }

    #[test]
    fn partial_update_only_touches_given_fields() {
        let mut prefs = Preferences::default();
        let update = PreferencesUpdate {
            voice: Some("Kore".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());

        update.apply_to(&mut prefs);

        assert_eq!(prefs.voice, "Kore");
        assert_eq!(prefs.language, Language::Spanish);
        assert!(PreferencesUpdate::default().is_empty());
    }
}
