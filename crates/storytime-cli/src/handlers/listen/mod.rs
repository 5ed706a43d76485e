//! `storytime listen`: the interactive story player.
//!
//! Plays the part of the story page. Lines typed by the listener drive an
//! [`AudioSession`]; session events are printed as they arrive. The first
//! line typed is the listener's first interaction and opens the audio
//! output. Language, voice and speed changes are saved to the active
//! profile.

mod command;
mod input;

pub use command::{CommandError, HELP, ReplCommand};

use std::sync::Arc;

use anyhow::{Result, anyhow};
use storytime_audio::{AudioSession, RodioOutputOpener, SessionEvent, SessionState};
use storytime_core::{Preferences, PreferencesUpdate, Profile, StoryLibrary, find_voice};
use tracing::{debug, warn};

use crate::CliContext;
use crate::handlers::profiles::resolve;
use crate::presentation::format_rate;

use input::LineReader;

/// Run the player until the listener quits.
///
/// With `profile`, the player starts from that profile's preferences and
/// saves changes back to it. Without one, the listener is a guest.
pub async fn execute(ctx: &CliContext, profile: Option<&str>) -> Result<()> {
    let active = match profile {
        Some(identifier) => {
            let profiles = ctx.profiles.list().await;
            let found = resolve(&profiles, identifier)
                .cloned()
                .ok_or_else(|| anyhow!("No profile matches '{identifier}'"))?;
            Some(found)
        }
        None => None,
    };
    let preferences = active
        .as_ref()
        .map_or_else(Preferences::default, |p| p.preferences.clone());

    let (session, mut events) = AudioSession::new(
        ctx.speech.clone(),
        ctx.stories.clone(),
        Arc::new(RodioOutputOpener),
        &preferences,
    );

    print_welcome(ctx, active.as_ref(), &session);
    let mut reader = LineReader::spawn("📖 > ".to_string())?;
    let mut player = Player {
        ctx,
        session: session.clone(),
        profile_id: active.map(|p| p.id),
        audio_ready: false,
    };

    loop {
        tokio::select! {
            line = reader.next_line() => {
                let Some(line) = line else { break };
                if !player.handle_line(&line).await {
                    break;
                }
                reader.ready();
            }
            Some(event) = events.recv() => print_event(&event),
        }
    }

    let closing = session.clone();
    tokio::task::spawn_blocking(move || closing.shutdown()).await?;
    println!("¡Adiós! 👋");
    Ok(())
}

struct Player<'a> {
    ctx: &'a CliContext,
    session: AudioSession,
    profile_id: Option<String>,
    audio_ready: bool,
}

impl Player<'_> {
    /// Handle one line. Returns `false` when the listener quits.
    async fn handle_line(&mut self, line: &str) -> bool {
        if !self.audio_ready {
            self.audio_ready = self.open_audio().await;
        }

        let command = match ReplCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return true,
            Err(e) => {
                println!("{e}");
                return true;
            }
        };
        debug!(?command, "Listener command");

        match command {
            ReplCommand::Play => {
                // Not awaited: loading can take a while and the prompt stays live.
                let session = self.session.clone();
                let runtime = tokio::runtime::Handle::current();
                tokio::task::spawn_blocking(move || runtime.block_on(session.play()));
            }
            ReplCommand::Stop => self.with_session(AudioSession::stop).await,
            ReplCommand::Language(language) => {
                self.with_session(move |s| s.set_language(language)).await;
                let story = self.ctx.stories.story(language);
                println!("{} {}: {}", language.flag(), language.display_name(), story.title);
                self.remember(PreferencesUpdate {
                    language: Some(language),
                    ..PreferencesUpdate::default()
                })
                .await;
            }
            ReplCommand::Voice(voice) => {
                self.with_session(move |s| s.set_voice(voice.id)).await;
                println!("🎙  {} ({})", voice.name, voice.id);
                self.remember(PreferencesUpdate {
                    voice: Some(voice.id.to_string()),
                    ..PreferencesUpdate::default()
                })
                .await;
            }
            ReplCommand::Rate(rate) => {
                self.with_session(move |s| s.set_rate(rate)).await;
                println!("⏩ {}", format_rate(rate));
                self.remember(PreferencesUpdate {
                    playback_rate: Some(rate),
                    ..PreferencesUpdate::default()
                })
                .await;
            }
            ReplCommand::Status => print_status(&self.session),
            ReplCommand::Story => {
                let story = self.ctx.stories.story(self.session.selection().language);
                println!("{}\n\n{}", story.title, story.content);
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => return false,
        }
        true
    }

    /// Open the audio output. A failure is reported and retried on the
    /// next line.
    async fn open_audio(&self) -> bool {
        let session = self.session.clone();
        match tokio::task::spawn_blocking(move || session.initialize()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                println!("⚠ Audio output unavailable: {e}");
                false
            }
            Err(e) => {
                warn!(error = %e, "Audio initialization task failed");
                false
            }
        }
    }

    /// Session calls wait on the audio thread, so they run off the async task.
    async fn with_session(&self, call: impl FnOnce(&AudioSession) + Send + 'static) {
        let session = self.session.clone();
        run_blocking(move || call(&session)).await;
    }

    async fn remember(&self, update: PreferencesUpdate) {
        let Some(id) = self.profile_id.as_deref() else {
            return;
        };
        if let Err(e) = self.ctx.profiles.update_preferences(id, &update).await {
            warn!(profile = id, error = %e, "Failed to save preferences");
            println!("⚠ Could not save preferences: {e}");
        }
    }
}

/// Run `call` on the blocking pool and wait for it.
async fn run_blocking(call: impl FnOnce() + Send + 'static) {
    if let Err(e) = tokio::task::spawn_blocking(call).await {
        warn!(error = %e, "Session call panicked");
    }
}

fn print_welcome(ctx: &CliContext, profile: Option<&Profile>, session: &AudioSession) {
    match profile {
        Some(p) => println!("¡Hola, {} {}!", p.avatar, p.name),
        None => println!("¡Hola! Listening as a guest."),
    }
    let selection = session.selection();
    let story = ctx.stories.story(selection.language);
    println!(
        "{} {} · voice {} · {}",
        selection.language.flag(),
        story.title,
        selection.voice,
        format_rate(session.rate())
    );
    println!("Type 'play' to listen, 'help' for more.");
}

fn print_status(session: &AudioSession) {
    let selection = session.selection();
    let narrator = find_voice(&selection.voice).map_or("?", |v| v.name);
    println!("State:    {}", session.state());
    println!(
        "Story:    {} {}",
        selection.language.flag(),
        selection.language.display_name()
    );
    println!("Voice:    {} ({narrator})", selection.voice);
    println!("Speed:    {}", format_rate(session.rate()));

    let cached: Vec<String> = session
        .cached_keys()
        .iter()
        .map(ToString::to_string)
        .collect();
    if cached.is_empty() {
        println!("Cached:   none");
    } else {
        println!("Cached:   {}", cached.join(", "));
    }
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::StateChanged(state) => match state {
            SessionState::Loading => println!("⏳ Preparing the narration..."),
            SessionState::Playing => println!("▶  Playing"),
            SessionState::Idle => println!("⏹  Stopped"),
            SessionState::Error(msg) => println!("⚠  {msg}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[tokio::test]
    async fn run_blocking_leaves_the_async_thread() {
        let caller = thread::current().id();
        let (tx, rx) = std::sync::mpsc::channel();

        run_blocking(move || tx.send(thread::current().id()).unwrap()).await;

        let ran_on = rx.try_recv().unwrap();
        assert_ne!(ran_on, caller);
    }

    #[tokio::test]
    async fn run_blocking_survives_a_panicking_call() {
        run_blocking(|| panic!("audio thread gone")).await;
    }
}
