use crate::domain::Language;

/// A story's title and narration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub content: String,
}

/// Source of story content, one story per language.
pub trait StoryLibrary: Send + Sync {
    fn story(&self, language: Language) -> Story;
}
