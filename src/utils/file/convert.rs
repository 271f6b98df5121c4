use std::io::Read;

use axum_typed_multipart::FieldData;
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult};

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[:*?"<>|\s\p{Cc}]"#).expect("valid filename regex"));

pub fn sanitize_filename(file_name: &str) -> String {
    // keep only the last path segment
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Unique stored name for an uploaded file.
pub fn unique_file_name(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(original))
}

#[derive(Debug)]
pub struct FileUpload {
    pub content_type: Option<String>,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Reads the temporary multipart file; it is removed when `data` is dropped.
pub fn convert_field_file_data(data: FieldData<NamedTempFile>) -> AppResult<FileUpload> {
    let content_type = data.metadata.content_type;
    let file_name = data
        .metadata
        .file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or(AppError::Generic {
            description: "File name missing".to_string(),
        })?;

    let mut buffer = Vec::new();
    let mut file = data.contents.as_file();
    file.read_to_end(&mut buffer)?;

    Ok(FileUpload {
        content_type,
        file_name: sanitize_filename(&file_name),
        data: buffer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_and_bad_chars() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\tmp\\my pic?.jpg"), "my_pic_.jpg");
        assert_eq!(sanitize_filename("..hidden.png"), "hidden.png");
        assert_eq!(sanitize_filename("  "), "file");
        assert_eq!(sanitize_filename("a\tb\u{7}<1>.jpg"), "a_b__1_.jpg");
        assert_eq!(sanitize_filename("café.jpg"), "café.jpg");
    }

    #[test]
    fn unique_names_differ() {
        let a = unique_file_name("a.jpg");
        let b = unique_file_name("a.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("_a.jpg"));
    }
}
