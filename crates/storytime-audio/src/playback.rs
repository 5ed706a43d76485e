//! rodio playback, owned by the audio thread.
//!
//! Every `play` gets its own sink and its own liveness flag. A completion
//! watcher thread waits for that sink to drain and fires the callback only if
//! the flag is still set, so a stopped or superseded playback never reports
//! natural completion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::decode::DecodedAudio;
use crate::error::AudioError;
use crate::output::PlaybackDoneCallback;
use crate::source::SharedSamples;

/// rodio rejects speeds at or below zero.
const MIN_SPEED: f32 = 0.1;

struct ActivePlayback {
    sink: Arc<Sink>,
    live: Arc<AtomicBool>,
}

pub(crate) struct RodioPlayback {
    /// Must stay alive for the stream handle to produce sound.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    current: Option<ActivePlayback>,
}

impl RodioPlayback {
    /// Open the default output device.
    pub(crate) fn new() -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;

        tracing::info!("Audio output opened on default device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            current: None,
        })
    }

    pub(crate) fn play(
        &mut self,
        audio: Arc<DecodedAudio>,
        rate: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<(), AudioError> {
        self.stop();

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;
        sink.set_speed(rate.max(MIN_SPEED));
        sink.append(SharedSamples::new(audio));

        let active = ActivePlayback {
            sink: Arc::new(sink),
            live: Arc::new(AtomicBool::new(true)),
        };
        spawn_completion_watcher(&active, on_done);
        self.current = Some(active);

        tracing::debug!(rate, "Playback started");
        Ok(())
    }

    pub(crate) fn stop(&mut self) {
        if let Some(active) = self.current.take() {
            // Clear the flag first so the watcher sees a manual stop.
            active.live.store(false, Ordering::SeqCst);
            active.sink.stop();
            tracing::debug!("Playback stopped");
        }
    }

    pub(crate) fn set_rate(&self, rate: f32) {
        if let Some(active) = &self.current {
            active.sink.set_speed(rate.max(MIN_SPEED));
        }
    }
}

/// Block a helper thread on the sink and report natural completion.
///
/// `Sink::stop` drops the queued sources, which also wakes
/// `sleep_until_end`.
fn spawn_completion_watcher(active: &ActivePlayback, on_done: PlaybackDoneCallback) {
    let sink = Arc::clone(&active.sink);
    let live = Arc::clone(&active.live);

    let spawned = thread::Builder::new()
        .name("storytime-playback-watch".into())
        .spawn(move || {
            sink.sleep_until_end();
            if live.swap(false, Ordering::SeqCst) {
                tracing::debug!("Playback finished naturally");
                on_done();
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Could not watch for playback completion");
    }
}
