//! Audio error types.

/// Errors raised while decoding or playing narration audio.
///
/// Cloneable so the session can keep the message in its `Error` state while
/// also returning the error to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    /// The payload could not be turned into PCM samples.
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// Playback was requested before the audio output was opened.
    #[error(
        "Audio output not initialized. Please interact with the app first (type any command) and try again."
    )]
    PlaybackPrecondition,

    /// The output device could not be opened or used.
    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// The dedicated audio thread has exited.
    #[error("Audio thread died unexpectedly")]
    AudioThreadDied,
}
