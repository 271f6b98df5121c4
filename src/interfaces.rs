pub mod file_storage;
pub mod tag_suggester;
