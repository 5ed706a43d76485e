//! Commands accepted inside `storytime listen`.

use storytime_core::{Language, Voice, find_rate, find_voice};
use thiserror::Error;

/// One parsed line of listener input.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Play, or stop if already playing.
    Play,
    Stop,
    Language(Language),
    Voice(Voice),
    Rate(f32),
    Status,
    Story,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' to see what you can do.")]
    Unknown(String),

    #[error("'{command}' needs a value, e.g. '{example}'")]
    MissingArgument {
        command: &'static str,
        example: &'static str,
    },

    #[error("Unknown language '{0}'. Choose es, en or fr.")]
    UnknownLanguage(String),

    #[error("Unknown voice '{0}'. Choose Puck, Kore or Zephyr.")]
    UnknownVoice(String),

    #[error("Unsupported speed '{0}'. Choose 0.75, 1, 1.25 or 1.5.")]
    UnsupportedRate(String),
}

impl ReplCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match head.to_lowercase().as_str() {
            "play" | "p" => Self::Play,
            "stop" | "s" => Self::Stop,
            "lang" | "language" | "l" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "lang",
                    example: "lang en",
                })?;
                let language = value
                    .parse()
                    .map_err(|_| CommandError::UnknownLanguage(value.to_string()))?;
                Self::Language(language)
            }
            "voice" | "v" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "voice",
                    example: "voice Kore",
                })?;
                let voice =
                    find_voice(value).ok_or_else(|| CommandError::UnknownVoice(value.to_string()))?;
                Self::Voice(voice)
            }
            "rate" | "speed" | "r" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "rate",
                    example: "rate 1.25",
                })?;
                Self::Rate(parse_rate(value)?)
            }
            "status" | "st" => Self::Status,
            "story" | "text" => Self::Story,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Accepts `1.25`, `1.25x` or `x1.25`, limited to the offered speeds.
fn parse_rate(value: &str) -> Result<f32, CommandError> {
    let number = value.trim_matches(|c| c == 'x' || c == 'X');
    number
        .parse::<f32>()
        .ok()
        .and_then(find_rate)
        .ok_or_else(|| CommandError::UnsupportedRate(value.to_string()))
}

pub const HELP: &str = "\
  play, p            play the story (or stop it if playing)
  stop, s            stop playback
  lang <es|en|fr>    change the story language
  voice <id>         change the narrator: Puck, Kore, Zephyr
  rate <speed>       change the speed: 0.75, 1, 1.25, 1.5
  status             show what is selected and cached
  story              print the story text
  help               show this list
  quit               leave the player";
