//! Dedicated audio thread: keeps the `!Send` rodio output stream off the
//! async runtime.
//!
//! [`AudioThreadHandle`] is the `Send + Sync` proxy. Every call becomes an
//! [`AudioCommand`] sent over a channel to the thread that owns the stream.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use crate::decode::DecodedAudio;
use crate::error::AudioError;
use crate::output::PlaybackDoneCallback;
use crate::playback::RodioPlayback;

enum AudioCommand {
    /// Replace any current playback with `audio` at `rate`.
    Play {
        audio: Arc<DecodedAudio>,
        rate: f32,
        on_done: PlaybackDoneCallback,
        reply: mpsc::Sender<Result<(), AudioError>>,
    },

    /// Stop the current playback. Replies once silenced.
    Stop { reply: mpsc::Sender<()> },

    /// Change the speed of the current playback (fire-and-forget).
    SetRate { rate: f32 },

    /// Release the device and exit.
    Shutdown,
}

/// `Send + Sync` handle to the audio thread.
///
/// Request-reply methods block the caller until the audio thread answers,
/// which is a local channel round-trip plus the rodio call itself.
pub struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread and open the default output device on it.
    ///
    /// Device errors are reported back through a one-shot init channel.
    pub fn spawn() -> Result<Self, AudioError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), AudioError>>();

        let thread = thread::Builder::new()
            .name("storytime-audio".into())
            .spawn(move || Self::run(&cmd_rx, &init_tx))
            .map_err(|e| {
                AudioError::OutputUnavailable(format!("failed to spawn audio thread: {e}"))
            })?;

        init_rx.recv().map_err(|_| AudioError::AudioThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    pub fn play(
        &self,
        audio: Arc<DecodedAudio>,
        rate: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<(), AudioError> {
        let (reply, rx) = mpsc::channel();
        self.cmd_tx
            .send(AudioCommand::Play {
                audio,
                rate,
                on_done,
                reply,
            })
            .map_err(|_| AudioError::AudioThreadDied)?;
        rx.recv().map_err(|_| AudioError::AudioThreadDied)?
    }

    /// Stop playback and wait until the sink has been silenced.
    pub fn stop(&self) {
        let (reply, rx) = mpsc::channel();
        if self.cmd_tx.send(AudioCommand::Stop { reply }).is_ok() {
            let _ = rx.recv();
        }
    }

    pub fn set_rate(&self, rate: f32) {
        let _ = self.cmd_tx.send(AudioCommand::SetRate { rate });
    }

    fn run(cmd_rx: &mpsc::Receiver<AudioCommand>, init_tx: &mpsc::Sender<Result<(), AudioError>>) {
        let mut playback = match RodioPlayback::new() {
            Ok(p) => p,
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        if init_tx.send(Ok(())).is_err() {
            return;
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                AudioCommand::Play {
                    audio,
                    rate,
                    on_done,
                    reply,
                } => {
                    let _ = reply.send(playback.play(audio, rate, on_done));
                }
                AudioCommand::Stop { reply } => {
                    playback.stop();
                    let _ = reply.send(());
                }
                AudioCommand::SetRate { rate } => playback.set_rate(rate),
                AudioCommand::Shutdown => break,
            }
        }

        playback.stop();
        tracing::debug!("Audio thread shutting down");
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
