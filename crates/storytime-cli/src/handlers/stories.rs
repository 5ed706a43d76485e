//! `storytime stories` and `storytime voices` handlers.

use storytime_core::{Language, PLAYBACK_RATES, StoryLibrary, VOICES};

use crate::CliContext;
use crate::presentation::{format_rate, print_separator};

/// List every story, or print the full text of one.
pub fn execute(ctx: &CliContext, language: Option<Language>) {
    if let Some(language) = language {
        let story = ctx.stories.story(language);
        println!("{} {}", language.flag(), story.title);
        println!();
        println!("{}", story.content);
        return;
    }

    println!("{:<4} {:<10} {:<8} {:<28} {:>5}", "", "Language", "Code", "Title", "Words");
    print_separator(60);
    for language in Language::ALL {
        let story = ctx.stories.story(language);
        println!(
            "{:<4} {:<10} {:<8} {:<28} {:>5}",
            language.flag(),
            language.display_name(),
            language.code(),
            story.title,
            story.content.split_whitespace().count(),
        );
    }
}

/// List narrator voices and playback speeds.
pub fn voices() {
    println!("{:<8} {:<12}", "Voice", "Narrator");
    print_separator(21);
    for voice in VOICES {
        println!("{:<8} {:<12}", voice.id, voice.name);
    }
    println!();
    let rates: Vec<String> = PLAYBACK_RATES.into_iter().map(format_rate).collect();
    println!("Speeds: {}", rates.join(", "));
}
