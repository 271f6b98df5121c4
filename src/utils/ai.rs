pub mod default_tag_suggester;
pub mod gemini_tag_suggester;
