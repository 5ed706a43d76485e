//! Speech synthesis port.
//!
//! The audio session only needs one thing from a text-to-speech backend: turn
//! a story text and a voice id into an encoded audio payload. Adapters (such as
//! `storytime-gemini`) implement [`SpeechProvider`] and map their own failures
//! onto [`ProviderError`] at the crate boundary.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Base64 text of raw PCM audio as returned by a speech provider.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedAudio(String);

impl EncodedAudio {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Payloads run to megabytes; keep logs readable.
impl fmt::Debug for EncodedAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedAudio")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Why a synthesis request failed.
///
/// The `Display` text is shown to the listener as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No credential is configured; no request was sent.
    #[error("API key not found. Please ensure it is configured in your environment.")]
    MissingCredential,

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("{0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("Speech request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response carried no audio.
    #[error("No audio data was returned from the API.")]
    EmptyResponse,

    /// The response could not be understood.
    #[error("Invalid response from speech provider: {0}")]
    InvalidResponse(String),
}

/// A text-to-speech backend.
///
/// One call is one attempt: implementations must not retry.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` narrated by `voice`.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<EncodedAudio, ProviderError>;
}
