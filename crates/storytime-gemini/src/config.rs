//! Public configuration for the Gemini speech client.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Configuration for [`DefaultGeminiClient`](crate::DefaultGeminiClient).
///
/// ```
/// use storytime_gemini::GeminiClientConfig;
/// use std::time::Duration;
///
/// let config = GeminiClientConfig::new()
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Clone)]
pub struct GeminiClientConfig {
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) api_key: Option<String>,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            user_agent: concat!("storytime-gemini/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
            api_key: None,
        }
    }
}

// Never print the key.
impl std::fmt::Debug for GeminiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClientConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}

impl GeminiClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults to the public `v1beta` endpoint.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Defaults to `gemini-2.5-flash-preview-tts`.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whole-request timeout. Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional key; blank keys count as missing.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
