use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub captions: Vec<String>,
}

#[async_trait]
pub trait TagSuggesterInterface {
    async fn analyze(&self, image: &[u8], content_type: Option<&str>)
        -> Result<PhotoAnalysis, String>;
}
