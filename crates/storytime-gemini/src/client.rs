//! Gemini text-to-speech client.

use storytime_core::EncodedAudio;
use tracing::debug;
use url::Url;

use crate::config::GeminiClientConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{GenerateContentRequest, GenerateContentResponse};

/// Gemini client using the reqwest backend.
pub type DefaultGeminiClient = GeminiSpeechClient<ReqwestBackend>;

/// Generic over the HTTP backend so tests can run without a network.
/// Production code uses [`DefaultGeminiClient`].
pub struct GeminiSpeechClient<B: HttpBackend> {
    pub(crate) backend: B,
    endpoint: Url,
    model: String,
    api_key: Option<String>,
}

impl DefaultGeminiClient {
    /// Build a client. Fails only on an unusable base URL or HTTP client
    /// setup; a missing key is reported per request.
    pub fn new(config: &GeminiClientConfig) -> GeminiResult<Self> {
        let backend = ReqwestBackend::new(config.timeout, &config.user_agent)?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> GeminiSpeechClient<B> {
    pub(crate) fn with_backend(config: &GeminiClientConfig, backend: B) -> GeminiResult<Self> {
        Ok(Self {
            backend,
            endpoint: endpoint_url(&config.base_url, &config.model)?,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// One `generateContent` call; returns the base64 PCM payload.
    pub async fn narrate(&self, text: &str, voice: &str) -> GeminiResult<EncodedAudio> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        debug!(model = %self.model, voice, chars = text.chars().count(), "Requesting speech");
        let request = GenerateContentRequest::narration(text, voice);
        let response: GenerateContentResponse = self
            .backend
            .post_json(&self.endpoint, api_key, &request)
            .await?;

        let audio = response.first_audio().ok_or(GeminiError::NoAudio)?;
        debug!(bytes = audio.len(), "Speech received");
        Ok(EncodedAudio::new(audio))
    }
}

/// `{base}/models/{model}:generateContent`
fn endpoint_url(base_url: &str, model: &str) -> GeminiResult<Url> {
    let base = base_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/models/{model}:generateContent"))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    fn audio_response(data: &str) -> serde_json::Value {
        json!({"candidates": [{"content": {"parts": [{"inlineData": {"data": data}}]}}]})
    }

    fn keyed() -> GeminiClientConfig {
        GeminiClientConfig::new().with_api_key("test-key")
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let url = endpoint_url("https://example.com/v1beta/", "tts-model").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/v1beta/models/tts-model:generateContent"
        );
        assert!(endpoint_url("not a url", "m").is_err());
    }

    #[test]
    fn default_client_builds() {
        let client = DefaultGeminiClient::new(&GeminiClientConfig::new()).unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash-preview-tts");
        assert!(client.endpoint().as_str().ends_with(":generateContent"));
    }

    #[tokio::test]
    async fn narrate_sends_key_prompt_and_voice() {
        let client =
            GeminiSpeechClient::with_backend(&keyed(), FakeBackend::ok(audio_response("AAAA")))
                .unwrap();

        let audio = client.narrate("Había una vez", "Puck").await.unwrap();

        assert_eq!(audio.as_str(), "AAAA");
        let sent = client.backend.recorded();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].api_key, "test-key");
        assert!(sent[0].url.ends_with("/models/gemini-2.5-flash-preview-tts:generateContent"));
        assert!(
            sent[0].body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .ends_with("children: Había una vez")
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let client = GeminiSpeechClient::with_backend(
            &GeminiClientConfig::new(),
            FakeBackend::ok(audio_response("AAAA")),
        )
        .unwrap();

        let err = client.narrate("text", "Puck").await.unwrap_err();

        assert!(matches!(err, GeminiError::MissingApiKey));
        assert!(client.backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn response_without_audio_is_no_audio() {
        let client =
            GeminiSpeechClient::with_backend(&keyed(), FakeBackend::ok(json!({"candidates": []})))
                .unwrap();

        let err = client.narrate("text", "Puck").await.unwrap_err();
        assert!(matches!(err, GeminiError::NoAudio));
    }
}
