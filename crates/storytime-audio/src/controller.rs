//! Single-flight playback control.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::decode::DecodedAudio;
use crate::error::AudioError;
use crate::output::{AudioOutput, AudioOutputOpener};

/// Identifies one live playback instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(u64);

impl PlaybackHandle {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback#{}", self.0)
    }
}

/// Natural-completion callback, told which playback ended.
pub type CompletionCallback = Box<dyn FnOnce(PlaybackHandle) + Send + 'static>;

/// Owns the audio output and the one live [`PlaybackHandle`].
///
/// Starting a playback always stops the previous one first, so at most one
/// handle is live. Rates are handed to the output unchanged.
pub struct PlaybackController {
    opener: Arc<dyn AudioOutputOpener>,
    output: Option<Box<dyn AudioOutput>>,
    current: Option<PlaybackHandle>,
    generation: u64,
}

impl PlaybackController {
    pub fn new(opener: Arc<dyn AudioOutputOpener>) -> Self {
        Self {
            opener,
            output: None,
            current: None,
            generation: 0,
        }
    }

    /// Open the audio output if it is not open yet.
    pub fn initialize(&mut self) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }
        self.output = Some(self.opener.open()?);
        info!("Playback controller initialized");
        Ok(())
    }

    /// Stop playback and close the audio output.
    pub fn release(&mut self) {
        self.stop();
        if self.output.take().is_some() {
            info!("Audio output released");
        }
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.output.is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<PlaybackHandle> {
        self.current
    }

    /// Play `audio` from the start at `rate`.
    ///
    /// `on_done` runs only if this playback reaches its natural end.
    pub fn play(
        &mut self,
        audio: Arc<DecodedAudio>,
        rate: f32,
        on_done: CompletionCallback,
    ) -> Result<PlaybackHandle, AudioError> {
        let Some(output) = self.output.as_ref() else {
            return Err(AudioError::PlaybackPrecondition);
        };

        if let Some(previous) = self.current.take() {
            output.stop();
            debug!(%previous, "Superseded live playback");
        }

        self.generation += 1;
        let handle = PlaybackHandle(self.generation);
        output.play(audio, rate, Box::new(move || on_done(handle)))?;
        self.current = Some(handle);

        debug!(%handle, rate, "Playback started");
        Ok(handle)
    }

    /// Silence and release the live playback, if any.
    pub fn stop(&mut self) {
        let Some(handle) = self.current.take() else {
            return;
        };
        if let Some(output) = &self.output {
            output.stop();
        }
        debug!(%handle, "Playback stopped");
    }

    /// Change the rate of the live playback. Ignored when nothing is playing.
    pub fn set_rate(&self, rate: f32) {
        if self.current.is_none() {
            return;
        }
        if let Some(output) = &self.output {
            output.set_rate(rate);
        }
    }

    /// Clear `handle` after it ended naturally.
    ///
    /// Returns `false` if `handle` is no longer the live playback.
    pub fn finish(&mut self, handle: PlaybackHandle) -> bool {
        if self.current == Some(handle) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_audio;
    use crate::output::PlaybackDoneCallback;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Log {
        events: Mutex<Vec<String>>,
        callbacks: Mutex<Vec<PlaybackDoneCallback>>,
    }

    struct FakeOutput(Arc<Log>);

    impl AudioOutput for FakeOutput {
        fn play(
            &self,
            _audio: Arc<DecodedAudio>,
            rate: f32,
            on_done: PlaybackDoneCallback,
        ) -> Result<(), AudioError> {
            self.0.events.lock().unwrap().push(format!("play@{rate}"));
            self.0.callbacks.lock().unwrap().push(on_done);
            Ok(())
        }

        fn stop(&self) {
            self.0.events.lock().unwrap().push("stop".to_string());
        }

        fn set_rate(&self, rate: f32) {
            self.0.events.lock().unwrap().push(format!("rate@{rate}"));
        }
    }

    struct FakeOpener(Arc<Log>);

    impl AudioOutputOpener for FakeOpener {
        fn open(&self) -> Result<Box<dyn AudioOutput>, AudioError> {
            self.0.events.lock().unwrap().push("open".to_string());
            Ok(Box::new(FakeOutput(Arc::clone(&self.0))))
        }
    }

    fn controller() -> (PlaybackController, Arc<Log>) {
        let log = Arc::new(Log::default());
        (
            PlaybackController::new(Arc::new(FakeOpener(Arc::clone(&log)))),
            log,
        )
    }

    fn events(log: &Log) -> Vec<String> {
        log.events.lock().unwrap().clone()
    }

    #[test]
    fn play_before_initialize_is_a_precondition_error() {
        let (mut controller, _log) = controller();
        let err = controller
            .play(Arc::new(test_audio(4)), 1.0, Box::new(|_| {}))
            .unwrap_err();
        assert_eq!(err, AudioError::PlaybackPrecondition);
    }

    #[test]
    fn initialize_opens_once() {
        let (mut controller, log) = controller();
        controller.initialize().unwrap();
        controller.initialize().unwrap();
        assert_eq!(events(&log), ["open"]);
        assert!(controller.is_initialized());
    }

    #[test]
    fn replacing_playback_stops_the_old_one_first() {
        let (mut controller, log) = controller();
        controller.initialize().unwrap();

        let first = controller
            .play(Arc::new(test_audio(4)), 1.0, Box::new(|_| {}))
            .unwrap();
        let second = controller
            .play(Arc::new(test_audio(4)), 1.5, Box::new(|_| {}))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(controller.current(), Some(second));
        assert_eq!(events(&log), ["open", "play@1", "stop", "play@1.5"]);
    }

    #[test]
    fn stop_is_idempotent_and_rate_needs_a_live_handle() {
        let (mut controller, log) = controller();
        controller.initialize().unwrap();

        controller.set_rate(1.25);
        controller.stop();
        controller
            .play(Arc::new(test_audio(4)), 0.75, Box::new(|_| {}))
            .unwrap();
        controller.set_rate(1.25);
        controller.stop();
        controller.stop();

        assert_eq!(events(&log), ["open", "play@0.75", "rate@1.25", "stop"]);
        assert_eq!(controller.current(), None);
    }

    #[test]
    fn completion_reports_the_handle_and_finish_clears_it() {
        let (mut controller, log) = controller();
        controller.initialize().unwrap();

        let seen = Arc::new(Mutex::new(None));
        let seen_cb = Arc::clone(&seen);
        let handle = controller
            .play(
                Arc::new(test_audio(4)),
                1.0,
                Box::new(move |h| *seen_cb.lock().unwrap() = Some(h)),
            )
            .unwrap();

        let callback = log.callbacks.lock().unwrap().pop().unwrap();
        callback();
        assert_eq!(*seen.lock().unwrap(), Some(handle));

        assert!(controller.finish(handle));
        assert!(!controller.finish(handle));
        assert_eq!(controller.current(), None);
    }

    #[test]
    fn release_stops_and_closes() {
        let (mut controller, log) = controller();
        controller.initialize().unwrap();
        controller
            .play(Arc::new(test_audio(4)), 1.0, Box::new(|_| {}))
            .unwrap();

        controller.release();

        assert!(!controller.is_initialized());
        assert_eq!(events(&log).last().map(String::as_str), Some("stop"));
    }
}
