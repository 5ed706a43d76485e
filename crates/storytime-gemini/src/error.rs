//! Internal error types for Gemini requests.
//!
//! Mapped to [`ProviderError`](storytime_core::ProviderError) at the port
//! boundary.

use std::time::Duration;

use thiserror::Error;

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key configured.
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    /// Non-success HTTP status.
    #[error("Gemini API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request did not complete within the configured timeout.
    #[error("Gemini request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Transport failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response had no inline audio.
    #[error("Gemini response contained no audio")]
    NoAudio,

    #[error("Invalid response from Gemini API: {message}")]
    InvalidResponse { message: String },

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
