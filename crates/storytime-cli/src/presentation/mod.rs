//! Presentation helpers for terminal output.

pub mod tables;

pub use tables::{format_rate, print_separator, truncate_string};
