//! CLI bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together:
//! - Profile store and service (via storytime-core)
//! - Speech provider (via storytime-gemini)
//! - Story library (compiled in)
//!
//! The audio output is not opened here; `listen` opens it on the first
//! line the listener types.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use storytime_core::{
    JsonProfileStore, ProfileService, SpeechProvider, StaticStoryLibrary, profiles_path,
};
use storytime_gemini::{DefaultGeminiClient, GeminiClientConfig};
use tracing::{debug, warn};

/// Primary API key variable.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Checked when [`API_KEY_ENV`] is unset.
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Where the profile list is stored.
    pub profiles_path: PathBuf,
    /// Speech client settings.
    pub gemini: GeminiClientConfig,
}

impl CliConfig {
    /// Default data paths and the API key from the environment.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            profiles_path: profiles_path()?,
            gemini: GeminiClientConfig::new().with_optional_api_key(api_key_from_env()),
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.gemini = self.gemini.with_model(model);
        }
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.gemini = self.gemini.with_base_url(url);
        }
        self
    }
}

/// First non-blank value of [`API_KEY_ENV`], then [`API_KEY_FALLBACK_ENV`].
fn api_key_from_env() -> Option<String> {
    [API_KEY_ENV, API_KEY_FALLBACK_ENV]
        .into_iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Listener profiles, already loaded.
    pub profiles: ProfileService,
    pub stories: Arc<StaticStoryLibrary>,
    pub speech: Arc<dyn SpeechProvider>,
    /// Location of the profile file, for `storytime paths`.
    pub profiles_path: PathBuf,
}

/// Build the [`CliContext`] from `config`.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let store = JsonProfileStore::new(config.profiles_path.clone());
    let profiles = ProfileService::new(Arc::new(store));
    profiles.load().await;

    if !config.gemini.has_api_key() {
        warn!("No {API_KEY_ENV} set; narration requests will fail");
    }
    let client = DefaultGeminiClient::new(&config.gemini).context("failed to build speech client")?;
    debug!(model = config.gemini.model(), base_url = config.gemini.base_url(), "Speech client ready");

    Ok(CliContext {
        profiles,
        stories: Arc::new(StaticStoryLibrary),
        speech: Arc::new(client),
        profiles_path: config.profiles_path,
    })
}
