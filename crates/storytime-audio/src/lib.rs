#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod audio_thread;
pub mod cache;
pub mod controller;
pub mod decode;
pub mod error;
pub mod output;
mod playback;
pub mod session;
mod source;

pub use audio_thread::AudioThreadHandle;
pub use cache::{AudioBufferCache, CacheKey};
pub use controller::{CompletionCallback, PlaybackController, PlaybackHandle};
pub use decode::{DecodedAudio, PcmFormat, decode, decode_audio, decode_payload};
pub use error::AudioError;
pub use output::{
    AudioOutput, AudioOutputOpener, LocalAudioOutput, PlaybackDoneCallback, RodioOutputOpener,
};
pub use session::{AudioSession, Selection, SessionEvent, SessionState};

// Only the integration tests implement async ports.
#[cfg(test)]
use async_trait as _;
