//! Compiled-in catalogue: stories, narrator voices, playback rates and avatars.

use crate::domain::Language;
use crate::ports::{Story, StoryLibrary};

/// A narrator voice offered by the speech provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    /// Provider voice id, sent with every synthesis request.
    pub id: &'static str,
    /// Friendly label shown to the listener.
    pub name: &'static str,
}

pub const VOICES: [Voice; 3] = [
    Voice {
        id: "Puck",
        name: "Cuentista",
    },
    Voice {
        id: "Kore",
        name: "Amiga",
    },
    Voice {
        id: "Zephyr",
        name: "Mágico",
    },
];

/// Voice used by new profiles.
pub const DEFAULT_VOICE: &str = VOICES[0].id;

/// Playback speeds the listener can choose from.
pub const PLAYBACK_RATES: [f32; 4] = [0.75, 1.0, 1.25, 1.5];

/// Avatar glyphs a profile may use.
pub const AVATARS: [&str; 8] = ["🐶", "🐱", "🦊", "🐻", "🐼", "🐰", "🦁", "🐯"];

/// Look up a voice by id (case-insensitive).
#[must_use]
pub fn find_voice(id: &str) -> Option<Voice> {
    VOICES
        .into_iter()
        .find(|voice| voice.id.eq_ignore_ascii_case(id.trim()))
}

/// Match a requested rate against [`PLAYBACK_RATES`].
#[must_use]
pub fn find_rate(rate: f32) -> Option<f32> {
    PLAYBACK_RATES
        .into_iter()
        .find(|candidate| (candidate - rate).abs() < 1e-3)
}

#[must_use]
pub fn is_avatar(glyph: &str) -> bool {
    AVATARS.contains(&glyph)
}

const SPANISH_TITLE: &str = "El Carpintero Amable";
const SPANISH_CONTENT: &str = "Había una vez, en un pueblo soleado, un carpintero llamado José. No era un carpintero cualquiera. ¡Podía hablar con los animales! Un día, un pajarito triste le dijo: \"Mi nido se cayó de un árbol\". José sonrió y con su madera mágica, le construyó la casita para pájaros más bonita. Pronto, todos los animales del bosque acudían a José. Construyó una madriguera acogedora para el conejo y una pequeña balsa para la rana. José era el héroe del bosque, demostrando que un poco de amabilidad y un martillo pueden arreglarlo todo.";

const ENGLISH_TITLE: &str = "The Kind Carpenter";
const ENGLISH_CONTENT: &str = "Once upon a time, in a sunny village, lived a carpenter named Joseph. He wasn't just any carpenter. He could talk to animals! One day, a sad little bird told him, \"My nest fell from a tree.\" Joseph smiled and with his magic wood, he built the most beautiful birdhouse for it. Soon, all the animals in the forest came to Joseph. He built a cozy burrow for the rabbit and a tiny raft for the frog. Joseph was the hero of the forest, showing that a little kindness and a hammer can fix anything.";

const FRENCH_TITLE: &str = "Le Gentil Charpentier";
const FRENCH_CONTENT: &str = "Il était une fois, dans un village ensoleillé, un charpentier nommé Joseph. Ce n'était pas n'importe quel charpentier. Il pouvait parler aux animaux ! Un jour, un petit oiseau triste lui dit : \"Mon nid est tombé d'un arbre.\" Joseph sourit et avec son bois magique, il lui construisit le plus beau des nichoirs. Bientôt, tous les animaux de la forêt vinrent voir Joseph. Il construisit un terrier douillet pour le lapin et un petit radeau pour la grenouille. Joseph était le héros de la forêt, montrant qu'un peu de gentillesse et un marteau peuvent tout arranger.";

/// The stories shipped with the binary, one per [`Language`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticStoryLibrary;

impl StoryLibrary for StaticStoryLibrary {
    fn story(&self, language: Language) -> Story {
        let (title, content) = match language {
            Language::Spanish => (SPANISH_TITLE, SPANISH_CONTENT),
            Language::English => (ENGLISH_TITLE, ENGLISH_CONTENT),
            Language::French => (FRENCH_TITLE, FRENCH_CONTENT),
        };
        Story {
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_story() {
        let library = StaticStoryLibrary;
        for lang in Language::ALL {
            let story = library.story(lang);
            assert!(!story.title.is_empty());
            assert!(!story.content.is_empty());
        }
        assert_eq!(
            library.story(Language::English).title,
            "The Kind Carpenter"
        );
    }

    #[test]
    fn voice_lookup_is_case_insensitive() {
        assert_eq!(find_voice("kore").map(|v| v.name), Some("Amiga"));
        assert!(find_voice("Fenrir").is_none());
        assert_eq!(DEFAULT_VOICE, "Puck");
    }

    #[test]
    fn rates_match_within_tolerance() {
        assert_eq!(find_rate(1.25), Some(1.25));
        assert_eq!(find_rate(0.7504), Some(0.75));
        assert_eq!(find_rate(2.0), None);
    }

    #[test]
    fn avatar_membership() {
        assert!(is_avatar("🐼"));
        assert!(!is_avatar("🐸"));
    }
}
