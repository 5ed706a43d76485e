//! Port definitions (trait abstractions) for external systems.
//!
//! Adapters implement these traits; services and the audio session depend on
//! them only through `Arc<dyn ...>`.

mod profile_repository;
mod speech;
mod story_library;

use thiserror::Error;

pub use profile_repository::ProfileRepository;
pub use speech::{EncodedAudio, ProviderError, SpeechProvider};
pub use story_library::{Story, StoryLibrary};

/// Domain-specific errors for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (filesystem, permissions, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
