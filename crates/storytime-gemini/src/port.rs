//! `SpeechProvider` implementation for `GeminiSpeechClient`.

use async_trait::async_trait;
use storytime_core::{EncodedAudio, ProviderError, SpeechProvider};

use crate::client::GeminiSpeechClient;
use crate::error::GeminiError;
use crate::http::HttpBackend;

fn map_error(err: GeminiError) -> ProviderError {
    match err {
        GeminiError::MissingApiKey => ProviderError::MissingCredential,
        GeminiError::NoAudio => ProviderError::EmptyResponse,
        GeminiError::Api { status, message } => ProviderError::Api { status, message },
        GeminiError::Timeout(_) | GeminiError::Network(_) => {
            ProviderError::Network(err.to_string())
        }
        GeminiError::InvalidResponse { message } => ProviderError::InvalidResponse(message),
        GeminiError::JsonParse(e) => ProviderError::InvalidResponse(e.to_string()),
        GeminiError::InvalidUrl(e) => ProviderError::Network(format!("Invalid Gemini URL: {e}")),
    }
}

#[async_trait]
impl<B: HttpBackend> SpeechProvider for GeminiSpeechClient<B> {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<EncodedAudio, ProviderError> {
        self.narrate(text, voice).await.map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiClientConfig;
    use crate::http::testing::FakeBackend;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn errors_map_to_provider_errors() {
        assert_eq!(
            map_error(GeminiError::MissingApiKey).to_string(),
            "API key not found. Please ensure it is configured in your environment."
        );
        assert_eq!(
            map_error(GeminiError::NoAudio).to_string(),
            "No audio data was returned from the API."
        );
        assert_eq!(
            map_error(GeminiError::Timeout(Duration::from_secs(60))),
            ProviderError::Network("Gemini request timed out after 60s".to_string())
        );
        assert_eq!(
            map_error(GeminiError::InvalidResponse {
                message: "truncated".to_string()
            }),
            ProviderError::InvalidResponse("truncated".to_string())
        );
    }

    #[tokio::test]
    async fn api_status_reaches_the_port() {
        let client = GeminiSpeechClient::with_backend(
            &GeminiClientConfig::new().with_api_key("k"),
            FakeBackend::status(429, "Resource has been exhausted"),
        )
        .unwrap();

        let provider: &dyn SpeechProvider = &client;
        let err = provider.synthesize("text", "Zephyr").await.unwrap_err();

        assert_eq!(
            err,
            ProviderError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        let client = GeminiSpeechClient::with_backend(
            &GeminiClientConfig::new().with_api_key("k"),
            FakeBackend::ok(json!({"candidates": "nope"})),
        )
        .unwrap();

        let err = client.synthesize("text", "Puck").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
