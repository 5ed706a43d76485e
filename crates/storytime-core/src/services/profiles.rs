//! Profile service - orchestrates profile operations.
//!
//! Keeps the loaded list in memory and writes the whole list back through the
//! repository on every mutation. The in-memory list only changes once the
//! write has succeeded.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Preferences, PreferencesUpdate, Profile};
use crate::ports::{ProfileRepository, RepositoryError};
use crate::stories::is_avatar;

/// Errors returned by [`ProfileService`].
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile name cannot be empty")]
    EmptyName,

    #[error("Unknown avatar '{0}'")]
    UnknownAvatar(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service for profile operations.
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    profiles: Mutex<Vec<Profile>>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self {
            repo,
            profiles: Mutex::new(Vec::new()),
        }
    }

    /// Load profiles from the repository.
    ///
    /// A failed load is logged and leaves the service with an empty list.
    pub async fn load(&self) -> Vec<Profile> {
        let loaded = match self.repo.load_all().await {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!(error = %e, "Failed to load profiles, starting with none");
                Vec::new()
            }
        };
        debug!(count = loaded.len(), "Profiles loaded");
        let mut profiles = self.profiles.lock().await;
        profiles.clone_from(&loaded);
        loaded
    }

    pub async fn list(&self) -> Vec<Profile> {
        self.profiles.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Profile> {
        self.profiles
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Create a profile with default preferences.
    ///
    /// `name` is trimmed and must not be empty; `avatar` must be one of the
    /// catalogue avatars.
    pub async fn create(&self, name: &str, avatar: &str) -> Result<Profile, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !is_avatar(avatar) {
            return Err(ProfileError::UnknownAvatar(avatar.to_string()));
        }

        let mut profiles = self.profiles.lock().await;
        let profile = Profile {
            id: next_id(&profiles),
            name: name.to_string(),
            avatar: avatar.to_string(),
            preferences: Preferences::default(),
        };

        let mut updated = profiles.clone();
        updated.push(profile.clone());
        self.repo.save_all(&updated).await?;
        *profiles = updated;

        info!(id = %profile.id, name = %profile.name, "Profile created");
        Ok(profile)
    }

    /// Apply a partial preferences update to one profile.
    pub async fn update_preferences(
        &self,
        id: &str,
        update: &PreferencesUpdate,
    ) -> Result<Profile, ProfileError> {
        let mut profiles = self.profiles.lock().await;
        let index = position(&profiles, id)?;
        if update.is_empty() {
            return Ok(profiles[index].clone());
        }

        let mut updated = profiles.clone();
        update.apply_to(&mut updated[index].preferences);
        self.repo.save_all(&updated).await?;
        *profiles = updated;

        debug!(id, ?update, "Profile preferences updated");
        Ok(profiles[index].clone())
    }

    /// Remove a profile, returning it.
    pub async fn remove(&self, id: &str) -> Result<Profile, ProfileError> {
        let mut profiles = self.profiles.lock().await;
        let index = position(&profiles, id)?;

        let mut updated = profiles.clone();
        let removed = updated.remove(index);
        self.repo.save_all(&updated).await?;
        *profiles = updated;

        info!(id, "Profile removed");
        Ok(removed)
    }
}

fn position(profiles: &[Profile], id: &str) -> Result<usize, ProfileError> {
    profiles
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ProfileError::NotFound(id.to_string()))
}

/// Creation time in milliseconds, bumped past any id already taken.
fn next_id(profiles: &[Profile]) -> String {
    let mut candidate = chrono::Utc::now().timestamp_millis();
    while profiles.iter().any(|p| p.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockProfileRepo {
        stored: StdMutex<Vec<Profile>>,
        saves: AtomicUsize,
        fail_load: bool,
        fail_save: AtomicBool,
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepo {
        async fn load_all(&self) -> Result<Vec<Profile>, RepositoryError> {
            if self.fail_load {
                return Err(RepositoryError::Serialization("bad json".to_string()));
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save_all(&self, profiles: &[Profile]) -> Result<(), RepositoryError> {
            if self.fail_save.load(Ordering::SeqCst) {
                return Err(RepositoryError::Storage("disk full".to_string()));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = profiles.to_vec();
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_trims_name_and_applies_defaults() {
        let repo = Arc::new(MockProfileRepo::default());
        let service = ProfileService::new(repo.clone());

        let profile = service.create("  Ana  ", "🐰").await.unwrap();

        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.preferences, Preferences::default());
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
        assert_eq!(repo.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_blank_name_and_unknown_avatar() {
        let service = ProfileService::new(Arc::new(MockProfileRepo::default()));

        assert!(matches!(
            service.create("   ", "🐶").await,
            Err(ProfileError::EmptyName)
        ));
        assert!(matches!(
            service.create("Leo", "🐸").await,
            Err(ProfileError::UnknownAvatar(_))
        ));
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn ids_are_unique_within_the_same_millisecond() {
        let service = ProfileService::new(Arc::new(MockProfileRepo::default()));

        let a = service.create("A", "🐶").await.unwrap();
        let b = service.create("B", "🐱").await.unwrap();
        let c = service.create("C", "🦊").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[tokio::test]
    async fn update_preferences_is_partial_and_persisted() {
        let repo = Arc::new(MockProfileRepo::default());
        let service = ProfileService::new(repo.clone());
        let profile = service.create("Mia", "🐼").await.unwrap();

        let update = PreferencesUpdate {
            language: Some(Language::French),
            ..Default::default()
        };
        let updated = service
            .update_preferences(&profile.id, &update)
            .await
            .unwrap();

        assert_eq!(updated.preferences.language, Language::French);
        assert_eq!(updated.preferences.voice, "Puck");
        let stored = repo.stored.lock().unwrap().clone();
        assert_eq!(stored[0].preferences.language, Language::French);
    }

    #[tokio::test]
    async fn failed_save_leaves_list_unchanged() {
        let repo = Arc::new(MockProfileRepo::default());
        let service = ProfileService::new(repo.clone());
        let profile = service.create("Tom", "🐻").await.unwrap();

        repo.fail_save.store(true, Ordering::SeqCst);
        let err = service.remove(&profile.id).await.unwrap_err();

        assert!(matches!(err, ProfileError::Repository(_)));
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn remove_unknown_profile_is_not_found() {
        let service = ProfileService::new(Arc::new(MockProfileRepo::default()));
        assert!(matches!(
            service.remove("nope").await,
            Err(ProfileError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn load_failure_falls_back_to_empty() {
        let repo = Arc::new(MockProfileRepo {
            fail_load: true,
            ..Default::default()
        });
        let service = ProfileService::new(repo);

        assert!(service.load().await.is_empty());
        assert!(service.get("anything").await.is_none());
    }
}
