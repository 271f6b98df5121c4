use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub total_photos: i64,
    pub total_followers: i64,
    pub total_following: i64,
    pub total_downloads: i64,
}
