//! Audio output seam.
//!
//! [`PlaybackController`](crate::PlaybackController) talks to the device only
//! through [`AudioOutput`], and acquires one lazily through an
//! [`AudioOutputOpener`]. The rodio implementations live here; tests supply
//! their own.

use std::sync::Arc;

use crate::audio_thread::AudioThreadHandle;
use crate::decode::DecodedAudio;
use crate::error::AudioError;

/// Invoked once when a playback reaches its natural end.
pub type PlaybackDoneCallback = Box<dyn FnOnce() + Send + 'static>;

/// A process-wide audio output that plays one buffer at a time.
///
/// Implementations must not invoke `on_done` from inside `play`, and never
/// after `stop` or after a later `play`.
pub trait AudioOutput: Send + Sync {
    /// Start `audio` from the beginning at `rate`, replacing anything playing.
    fn play(
        &self,
        audio: Arc<DecodedAudio>,
        rate: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<(), AudioError>;

    /// Silence the current playback. Does nothing when idle.
    fn stop(&self);

    /// Change the speed of the current playback without restarting it.
    fn set_rate(&self, rate: f32);
}

/// Opens the audio output on first use.
pub trait AudioOutputOpener: Send + Sync {
    fn open(&self) -> Result<Box<dyn AudioOutput>, AudioError>;
}

/// Default-device output backed by the audio thread.
pub struct LocalAudioOutput {
    handle: AudioThreadHandle,
}

impl LocalAudioOutput {
    pub fn open() -> Result<Self, AudioError> {
        Ok(Self {
            handle: AudioThreadHandle::spawn()?,
        })
    }
}

impl AudioOutput for LocalAudioOutput {
    fn play(
        &self,
        audio: Arc<DecodedAudio>,
        rate: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<(), AudioError> {
        self.handle.play(audio, rate, on_done)
    }

    fn stop(&self) {
        self.handle.stop();
    }

    fn set_rate(&self, rate: f32) {
        self.handle.set_rate(rate);
    }
}

/// Opens a [`LocalAudioOutput`] on the default device.
#[derive(Debug, Clone, Copy, Default)]
pub struct RodioOutputOpener;

impl AudioOutputOpener for RodioOutputOpener {
    fn open(&self) -> Result<Box<dyn AudioOutput>, AudioError> {
        Ok(Box::new(LocalAudioOutput::open()?))
    }
}
