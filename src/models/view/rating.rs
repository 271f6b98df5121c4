use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::photo::rating_entity::Rating;
use crate::middleware::utils::string_utils::thing_key;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingView {
    pub id: String,
    pub user_id: String,
    pub photo_id: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for RatingView {
    fn from(rating: Rating) -> Self {
        RatingView {
            id: thing_key(&rating.id),
            user_id: thing_key(&rating.user),
            photo_id: thing_key(&rating.photo),
            score: rating.score,
            created_at: rating.created_at,
        }
    }
}
