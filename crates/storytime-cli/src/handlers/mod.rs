//! Command handlers. Each takes the [`CliContext`](crate::CliContext) and
//! prints its own output.

pub mod listen;
pub mod paths;
pub mod profiles;
pub mod stories;
