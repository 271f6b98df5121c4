use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::interfaces::tag_suggester::{PhotoAnalysis, TagSuggesterInterface};

pub const DEFAULT_TAGS: [&str; 20] = [
    "nature",
    "portrait",
    "landscape",
    "travel",
    "food",
    "architecture",
    "wildlife",
    "street",
    "black-and-white",
    "sunset",
    "mountain",
    "beach",
    "city",
    "night",
    "macro",
    "sport",
    "fashion",
    "event",
    "art",
    "architecture",
];

/// Offline suggester: random sample of the default vocabulary, no captions.
pub struct DefaultTagSuggester {
    top_k: usize,
}

impl DefaultTagSuggester {
    pub fn new() -> Self {
        DefaultTagSuggester { top_k: 10 }
    }

    pub fn sample(&self) -> Vec<String> {
        let mut rng = rand::thread_rng();
        let mut tags: Vec<String> = Vec::with_capacity(self.top_k);
        for tag in DEFAULT_TAGS.choose_multiple(&mut rng, self.top_k) {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}

impl Default for DefaultTagSuggester {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagSuggesterInterface for DefaultTagSuggester {
    async fn analyze(&self, _: &[u8], _: Option<&str>) -> Result<PhotoAnalysis, String> {
        Ok(PhotoAnalysis {
            tags: self.sample(),
            captions: vec![],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn samples_from_vocabulary() {
        let res = DefaultTagSuggester::new().analyze(b"img", None).await.unwrap();
        assert!(!res.tags.is_empty());
        assert!(res.tags.len() <= 10);
        assert!(res.tags.iter().all(|t| DEFAULT_TAGS.contains(&t.as_str())));
        assert!(res.captions.is_empty());
    }
}
