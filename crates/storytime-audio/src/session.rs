//! Audio session: the play/stop/rate state machine behind the story page.
//!
//! ```text
//! Idle/Error --play (cache miss)--> Loading --ok--> Playing
//! Idle/Error --play (cache hit)---> Playing
//! Loading    --synthesis failed---> Error(msg)
//! Playing    --play/stop----------> Idle
//! Playing    --ended naturally----> Idle
//! any        --language/voice-----> Idle
//! ```
//!
//! The session owns the decoded-audio cache and the playback controller
//! behind one `std::sync::Mutex`. The lock is never held across `.await`:
//! the provider call is the only suspension point. At most one synthesis per
//! cache key is in flight. A `Loading` session waits on one key; stop and
//! selection changes clear it, and a finished synthesis only starts playback
//! if the session is still waiting on its key. The result is cached either
//! way, under the key captured when the request was made, so a play for a
//! key already in flight joins that request instead of issuing another.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use storytime_core::{Language, Preferences, SpeechProvider, StoryLibrary};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::{AudioBufferCache, CacheKey};
use crate::controller::{PlaybackController, PlaybackHandle};
use crate::decode::{DecodedAudio, PcmFormat, decode_payload};
use crate::error::AudioError;
use crate::output::AudioOutputOpener;

/// What the story page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Playing,
    Error(String),
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Playing => f.write_str("playing"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Events emitted by the session for the UI to consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged(SessionState),
}

/// The narration currently selected: story language plus narrator voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub language: Language,
    pub voice: String,
}

impl Selection {
    fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.language, self.voice.clone())
    }
}

struct Inner {
    state: SessionState,
    selection: Selection,
    rate: f32,
    /// Key the `Loading` state is waiting on.
    awaiting: Option<CacheKey>,
    in_flight: HashSet<CacheKey>,
    cache: AudioBufferCache,
    controller: PlaybackController,
}

struct Shared {
    provider: Arc<dyn SpeechProvider>,
    stories: Arc<dyn StoryLibrary>,
    inner: Mutex<Inner>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

/// A synthesis started by `play`, carried across the provider call.
struct PendingRequest {
    key: CacheKey,
    text: String,
}

/// Cloneable handle to one audio session.
///
/// All methods take `&self`; clones share the same state, cache and output.
#[derive(Clone)]
pub struct AudioSession {
    shared: Arc<Shared>,
}

impl AudioSession {
    /// Create a session starting from `preferences`, plus the receiver for
    /// its [`SessionEvent`]s.
    pub fn new(
        provider: Arc<dyn SpeechProvider>,
        stories: Arc<dyn StoryLibrary>,
        opener: Arc<dyn AudioOutputOpener>,
        preferences: &Preferences,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let inner = Inner {
            state: SessionState::Idle,
            selection: Selection {
                language: preferences.language,
                voice: preferences.voice.clone(),
            },
            rate: preferences.playback_rate,
            awaiting: None,
            in_flight: HashSet::new(),
            cache: AudioBufferCache::new(),
            controller: PlaybackController::new(opener),
        };
        let session = Self {
            shared: Arc::new(Shared {
                provider,
                stories,
                inner: Mutex::new(inner),
                event_tx,
            }),
        };
        (session, event_rx)
    }

    /// Open the audio output. Call on the first user interaction.
    pub fn initialize(&self) -> Result<(), AudioError> {
        self.shared.lock().controller.initialize()
    }

    /// Toggle playback of the current selection.
    ///
    /// Ignored while `Loading`; stops when `Playing`. Otherwise plays from
    /// the cache, or synthesizes, decodes and caches first. If the key is
    /// already being synthesized, waits for that request instead.
    pub async fn play(&self) {
        let Some(request) = self.begin_play() else {
            return;
        };

        info!(key = %request.key, "Requesting narration");
        let result = self
            .shared
            .provider
            .synthesize(&request.text, request.key.voice())
            .await
            .map_err(|e| e.to_string())
            .and_then(|encoded| {
                decode_payload(encoded.as_str(), PcmFormat::PROVIDER).map_err(|e| e.to_string())
            });

        self.complete_play(request, result);
    }

    /// Everything `play` does before the provider call. Returns the request
    /// to send, if any.
    fn begin_play(&self) -> Option<PendingRequest> {
        let mut inner = self.shared.lock();

        match inner.state {
            SessionState::Loading => {
                debug!("Play ignored while loading");
                return None;
            }
            SessionState::Playing => {
                self.shared.stop_locked(&mut inner);
                return None;
            }
            SessionState::Idle | SessionState::Error(_) => {}
        }

        if !inner.controller.is_initialized() {
            let msg = AudioError::PlaybackPrecondition.to_string();
            self.shared.set_state(&mut inner, SessionState::Error(msg));
            return None;
        }

        let key = inner.selection.cache_key();
        if let Some(audio) = inner.cache.get(&key) {
            debug!(%key, "Cache hit");
            self.shared.start_locked(&mut inner, audio);
            return None;
        }

        self.shared.set_state(&mut inner, SessionState::Loading);
        inner.awaiting = Some(key.clone());
        if !inner.in_flight.insert(key.clone()) {
            debug!(%key, "Joining synthesis already in flight");
            return None;
        }
        let text = self.shared.stories.story(key.language()).content;
        Some(PendingRequest { key, text })
    }

    fn complete_play(&self, request: PendingRequest, result: Result<DecodedAudio, String>) {
        let mut inner = self.shared.lock();
        inner.in_flight.remove(&request.key);
        let current = inner.state == SessionState::Loading
            && inner.awaiting.as_ref() == Some(&request.key);
        if current {
            inner.awaiting = None;
        }

        match result {
            Ok(audio) => {
                let audio = inner.cache.put(request.key.clone(), audio);
                if current {
                    self.shared.start_locked(&mut inner, audio);
                } else {
                    debug!(key = %request.key, "Narration arrived after the request was abandoned");
                }
            }
            Err(msg) => {
                warn!(key = %request.key, error = %msg, "Narration failed");
                if current {
                    self.shared.set_state(&mut inner, SessionState::Error(msg));
                }
            }
        }
    }

    /// Stop playback (or abandon a pending play) and go `Idle`.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner);
    }

    pub fn set_language(&self, language: Language) {
        self.change_selection(|selection| selection.language = language);
    }

    pub fn set_voice(&self, voice: impl Into<String>) {
        let voice = voice.into();
        self.change_selection(|selection| selection.voice = voice);
    }

    /// Change language and voice together.
    pub fn select(&self, language: Language, voice: impl Into<String>) {
        let voice = voice.into();
        self.change_selection(|selection| {
            selection.language = language;
            selection.voice = voice;
        });
    }

    /// A real change stops playback and does not restart it.
    fn change_selection(&self, update: impl FnOnce(&mut Selection)) {
        let mut inner = self.shared.lock();
        let mut selection = inner.selection.clone();
        update(&mut selection);
        if inner.selection == selection {
            return;
        }
        debug!(language = %selection.language, voice = %selection.voice, "Selection changed");
        inner.selection = selection;
        self.shared.stop_locked(&mut inner);
    }

    /// Set the rate for the live playback and every later one.
    pub fn set_rate(&self, rate: f32) {
        let mut inner = self.shared.lock();
        inner.rate = rate;
        inner.controller.set_rate(rate);
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.shared.lock().state.clone()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.shared.lock().selection.clone()
    }

    #[must_use]
    pub fn rate(&self) -> f32 {
        self.shared.lock().rate
    }

    #[must_use]
    pub fn is_cached(&self, language: Language, voice: &str) -> bool {
        self.shared
            .lock()
            .cache
            .contains(&CacheKey::new(language, voice))
    }

    /// Keys of every cached narration.
    #[must_use]
    pub fn cached_keys(&self) -> Vec<CacheKey> {
        self.shared.lock().cache.keys()
    }

    /// Stop, release the audio output and drop cached audio.
    pub fn shutdown(&self) {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner);
        inner.controller.release();
        inner.cache.clear();
        info!("Audio session shut down");
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop_locked(&self, inner: &mut Inner) {
        inner.awaiting = None;
        inner.controller.stop();
        self.set_state(inner, SessionState::Idle);
    }

    fn start_locked(self: &Arc<Self>, inner: &mut Inner, audio: Arc<DecodedAudio>) {
        let weak = Arc::downgrade(self);
        let on_done = Box::new(move |handle| Self::playback_ended(&weak, handle));

        match inner.controller.play(audio, inner.rate, on_done) {
            Ok(_) => self.set_state(inner, SessionState::Playing),
            Err(e) => self.set_state(inner, SessionState::Error(e.to_string())),
        }
    }

    /// Runs on the output's completion thread.
    fn playback_ended(weak: &Weak<Self>, handle: PlaybackHandle) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut inner = shared.lock();
        if inner.controller.finish(handle) && inner.state == SessionState::Playing {
            debug!(%handle, "Narration finished");
            shared.set_state(&mut inner, SessionState::Idle);
        }
    }

    fn set_state(&self, inner: &mut Inner, new_state: SessionState) {
        if inner.state != new_state {
            debug!(old = %inner.state, new = %new_state, "Session state transition");
            inner.state = new_state.clone();
            self.emit(SessionEvent::StateChanged(new_state));
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Session event receiver dropped");
        }
    }
}
