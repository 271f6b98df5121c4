use serde::{Deserialize, Deserializer};
use validator::ValidationError;

pub const MAX_TAG_LEN: usize = 100;

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if tag.trim().chars().count() > MAX_TAG_LEN {
            return Err(ValidationError::new("invalid_tags")
                .with_message(format!("Tag longer than {MAX_TAG_LEN} characters").into()));
        }
    }
    Ok(())
}

/// Trimmed, non empty and without duplicates, in input order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut res: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()) {
        if !tag.is_empty() && !res.iter().any(|t| t == tag) {
            res.push(tag.to_string());
        }
    }
    res
}
