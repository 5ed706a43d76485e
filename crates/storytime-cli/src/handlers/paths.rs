//! Paths command handler.
//!
//! Displays resolved paths in `key = value` format, for diagnosing where
//! profiles are read from.

use anyhow::Result;
use storytime_core::{DATA_DIR_ENV, data_root};

use crate::CliContext;

pub fn execute(ctx: &CliContext) -> Result<()> {
    let root = data_root()?;
    let overridden = std::env::var_os(DATA_DIR_ENV).is_some();

    println!("data_root = {}", root.display());
    println!("profiles = {}", ctx.profiles_path.display());
    if overridden {
        println!("# data_root set by {DATA_DIR_ENV}");
    }
    Ok(())
}
