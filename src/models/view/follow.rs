use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::user_auth::follow_entity::Follow;
use crate::middleware::utils::string_utils::thing_key;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowView {
    pub id: String,
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Follow> for FollowView {
    fn from(follow: Follow) -> Self {
        FollowView {
            id: thing_key(&follow.id),
            follower_id: thing_key(&follow.r#in),
            followee_id: thing_key(&follow.out),
            created_at: follow.created_at,
        }
    }
}
