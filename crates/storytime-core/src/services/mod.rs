//! Application services built on top of the ports.

mod profiles;

pub use profiles::{ProfileError, ProfileService};
