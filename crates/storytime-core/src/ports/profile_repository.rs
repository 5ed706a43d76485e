//! Profile repository trait definition.
//!
//! Profiles are small and few, so the port deals in the whole list at once:
//! load everything, save everything.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Profile;

/// Persistence for the full list of listener profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load all profiles. An absent store yields an empty list.
    async fn load_all(&self) -> Result<Vec<Profile>, RepositoryError>;

    /// Replace the stored list with `profiles`.
    async fn save_all(&self, profiles: &[Profile]) -> Result<(), RepositoryError>;
}
