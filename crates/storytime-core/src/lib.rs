#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod storage;
pub mod stories;

pub use domain::{Language, Preferences, PreferencesUpdate, Profile, UnknownLanguage};
pub use paths::{DATA_DIR_ENV, PROFILES_FILE_NAME, PathError, data_root, profiles_path};
pub use ports::{
    EncodedAudio, ProfileRepository, ProviderError, RepositoryError, SpeechProvider, Story,
    StoryLibrary,
};
pub use services::{ProfileError, ProfileService};
pub use storage::JsonProfileStore;
pub use stories::{
    AVATARS, DEFAULT_VOICE, PLAYBACK_RATES, StaticStoryLibrary, VOICES, Voice, find_rate,
    find_voice, is_avatar,
};
