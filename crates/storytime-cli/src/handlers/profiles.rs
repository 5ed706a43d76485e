//! `storytime profiles` handlers.

use anyhow::{Result, anyhow};
use storytime_core::{AVATARS, Profile};

use crate::CliContext;
use crate::presentation::{format_rate, print_separator, truncate_string};
use crate::profile_commands::ProfileCommand;

pub async fn execute(ctx: &CliContext, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::List => list(ctx).await,
        ProfileCommand::Create { name, avatar } => create(ctx, &name, &avatar).await,
        ProfileCommand::Remove { identifier } => remove(ctx, &identifier).await,
    }
}

async fn list(ctx: &CliContext) -> Result<()> {
    let profiles = ctx.profiles.list().await;
    if profiles.is_empty() {
        println!("No profiles yet. Create one with: storytime profiles create <name>");
        println!("Avatars: {}", AVATARS.join(" "));
        return Ok(());
    }

    println!(
        "{:<15} {:<3} {:<20} {:<10} {:<8} {:<6}",
        "ID", "", "Name", "Language", "Voice", "Speed"
    );
    print_separator(66);
    for profile in &profiles {
        let prefs = &profile.preferences;
        println!(
            "{:<15} {:<3} {:<20} {:<10} {:<8} {:<6}",
            profile.id,
            profile.avatar,
            truncate_string(&profile.name, 20),
            prefs.language.code(),
            prefs.voice,
            format_rate(prefs.playback_rate),
        );
    }
    println!();
    println!("{} profile(s)", profiles.len());
    Ok(())
}

async fn create(ctx: &CliContext, name: &str, avatar: &str) -> Result<()> {
    let profile = ctx.profiles.create(name, avatar).await?;
    println!(
        "Created {} {} (id {})",
        profile.avatar, profile.name, profile.id
    );
    Ok(())
}

async fn remove(ctx: &CliContext, identifier: &str) -> Result<()> {
    let profiles = ctx.profiles.list().await;
    let id = resolve(&profiles, identifier)
        .map(|p| p.id.clone())
        .ok_or_else(|| anyhow!("No profile matches '{identifier}'"))?;

    let removed = ctx.profiles.remove(&id).await?;
    println!("Removed {} {}", removed.avatar, removed.name);
    Ok(())
}

/// Find a profile by exact id, then by name (case-insensitive).
pub fn resolve<'a>(profiles: &'a [Profile], identifier: &str) -> Option<&'a Profile> {
    let identifier = identifier.trim();
    profiles.iter().find(|p| p.id == identifier).or_else(|| {
        let wanted = identifier.to_lowercase();
        profiles.iter().find(|p| p.name.to_lowercase() == wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storytime_core::Preferences;

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: name.to_string(),
            avatar: "🐼".to_string(),
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn resolve_prefers_id() {
        let profiles = vec![profile("1", "2"), profile("2", "Leo")];
        assert_eq!(resolve(&profiles, "2").map(|p| p.name.as_str()), Some("Leo"));
    }

    #[test]
    fn resolve_falls_back_to_name_ignoring_case() {
        let profiles = vec![profile("1712", "Sofía")];
        assert_eq!(
            resolve(&profiles, " SOFÍA ").map(|p| p.id.as_str()),
            Some("1712")
        );
    }

    #[test]
    fn resolve_unknown_is_none() {
        assert!(resolve(&[profile("1", "Leo")], "Ana").is_none());
    }
}
