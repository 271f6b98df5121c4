use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::photo::comment_entity::Comment;
use crate::middleware::utils::string_utils::thing_key;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub user_id: String,
    pub photo_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        CommentView {
            id: thing_key(&comment.id),
            user_id: thing_key(&comment.user),
            photo_id: thing_key(&comment.photo),
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}
