//! Decoded-audio cache keyed by (language, voice).
//!
//! Entries are never overwritten or evicted while the session lives; a
//! narration for a given language and voice is synthesized at most once.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use storytime_core::Language;
use tracing::{debug, warn};

use crate::decode::DecodedAudio;

/// Identifies one narration: the story language plus the narrator voice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    language: Language,
    voice: String,
}

impl CacheKey {
    pub fn new(language: Language, voice: impl Into<String>) -> Self {
        Self {
            language,
            voice: voice.into(),
        }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn voice(&self) -> &str {
        &self.voice
    }
}

/// `es-ES-Puck`
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.language.code(), self.voice)
    }
}

#[derive(Debug, Default)]
pub struct AudioBufferCache {
    entries: HashMap<CacheKey, Arc<DecodedAudio>>,
}

impl AudioBufferCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<DecodedAudio>> {
        self.entries.get(key).cloned()
    }

    /// Store `audio` under `key` and return the shared buffer.
    ///
    /// If the key is already present the existing buffer is kept and returned.
    pub fn put(&mut self, key: CacheKey, audio: DecodedAudio) -> Arc<DecodedAudio> {
        match self.entries.entry(key) {
            Entry::Occupied(existing) => {
                warn!(key = %existing.key(), "Audio already cached, keeping first buffer");
                Arc::clone(existing.get())
            }
            Entry::Vacant(slot) => {
                debug!(key = %slot.key(), frames = audio.frames(), "Caching decoded audio");
                Arc::clone(slot.insert(Arc::new(audio)))
            }
        }
    }

    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached keys, sorted by their string form.
    #[must_use]
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<_> = self.entries.keys().cloned().collect();
        keys.sort_by_key(ToString::to_string);
        keys
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
