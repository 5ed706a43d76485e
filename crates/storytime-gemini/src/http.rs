//! HTTP backend abstraction for the Gemini API.
//!
//! The client is generic over [`HttpBackend`] so tests can swap in a fake.
//! The production backend sends exactly one request per call.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{GeminiError, GeminiResult};
use crate::models::ApiErrorBody;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` as JSON and deserialize a success response.
    async fn post_json<B, T>(&self, url: &Url, api_key: &str, body: &B) -> GeminiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

/// Production backend using reqwest. No retries.
pub struct ReqwestBackend {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestBackend {
    pub fn new(timeout: Duration, user_agent: &str) -> GeminiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> GeminiError {
        if err.is_timeout() {
            GeminiError::Timeout(self.timeout)
        } else {
            GeminiError::Network(err)
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<B, T>(&self, url: &Url, api_key: &str, body: &B) -> GeminiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(url.as_str())
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_message(&text, status.canonical_reason()),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Best human-readable message from an error response body.
fn error_message(body: &str, reason: Option<&str>) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message.or(b.error.status))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string())
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// A request captured by [`FakeBackend`].
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub api_key: String,
        pub body: serde_json::Value,
    }

    /// Returns one canned outcome for every request and records what was sent.
    pub struct FakeBackend {
        outcome: Result<serde_json::Value, (u16, String)>,
        pub requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeBackend {
        pub fn ok(json: serde_json::Value) -> Self {
            Self {
                outcome: Ok(json),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn status(status: u16, message: &str) -> Self {
            Self {
                outcome: Err((status, message.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn recorded(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn post_json<B, T>(&self, url: &Url, api_key: &str, body: &B) -> GeminiResult<T>
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                api_key: api_key.to_string(),
                body: serde_json::to_value(body)?,
            });
            match &self.outcome {
                Ok(json) => Ok(serde_json::from_value(json.clone())?),
                Err((status, message)) => Err(GeminiError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_api_error_body() {
        let body = r#"{"error":{"code":400,"message":"Voice not found","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body, Some("Bad Request")), "Voice not found");
    }

    #[test]
    fn error_message_falls_back_to_raw_body_then_reason() {
        assert_eq!(error_message("upstream down", None), "upstream down");
        assert_eq!(error_message("  ", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message("", None), "request failed");
    }

    #[test]
    fn reqwest_backend_builds() {
        let backend = ReqwestBackend::new(Duration::from_secs(1), "test-agent").unwrap();
        assert_eq!(backend.timeout, Duration::from_secs(1));
    }
}
