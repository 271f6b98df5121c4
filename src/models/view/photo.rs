use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::entities::photo::photo_tag_entity::TABLE_NAME as PHOTO_TAG_TABLE;
use crate::middleware::utils::db_utils::ViewFieldSelector;
use crate::middleware::utils::string_utils::thing_key;

/// Photo row with its tags, as read from the db.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoWithTags {
    pub id: Thing,
    pub user: Thing,
    pub filename: String,
    pub caption: Option<String>,
    pub upload_time: DateTime<Utc>,
    pub download_count: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ViewFieldSelector for PhotoWithTags {
    fn get_select_query_fields() -> String {
        format!(
            "id,
        user,
        filename,
        caption,
        upload_time,
        download_count,
        (SELECT VALUE tag_text FROM {PHOTO_TAG_TABLE} WHERE photo = $parent.id) AS tags"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoView {
    pub id: String,
    pub user_id: String,
    pub filename: String,
    pub caption: Option<String>,
    pub upload_time: DateTime<Utc>,
    pub download_count: i64,
    pub tags: Vec<String>,
}

impl From<PhotoWithTags> for PhotoView {
    fn from(photo: PhotoWithTags) -> Self {
        PhotoView {
            id: thing_key(&photo.id),
            user_id: thing_key(&photo.user),
            filename: photo.filename,
            caption: photo.caption,
            upload_time: photo.upload_time,
            download_count: photo.download_count,
            tags: photo.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoListView {
    pub items: Vec<PhotoView>,
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSuggestionView {
    pub suggestions: Vec<String>,
    pub captions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPhotoView {
    pub date: String,
    pub photo: PhotoView,
}
