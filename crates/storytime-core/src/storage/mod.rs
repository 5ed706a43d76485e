//! Storage adapters for the core ports.

mod json;

pub use json::JsonProfileStore;
