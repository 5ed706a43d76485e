#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]
// GeminiSpeechClient's backend parameter is an implementation detail; callers
// use DefaultGeminiClient through the SpeechProvider port.
#![allow(private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

pub use client::{DefaultGeminiClient, GeminiSpeechClient};
pub use config::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClientConfig};
pub use error::{GeminiError, GeminiResult};
