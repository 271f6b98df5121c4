use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::photo::best_photo_entity::TABLE_NAME as BEST_PHOTO_TABLE;
use crate::entities::photo::comment_entity::TABLE_NAME as COMMENT_TABLE;
use crate::entities::photo::photo_tag_entity::TABLE_NAME as PHOTO_TAG_TABLE;
use crate::entities::photo::rating_entity::TABLE_NAME as RATING_TABLE;
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder, ViewFieldSelector};
use crate::middleware::utils::string_utils::get_table_thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Thing,
    pub user: Thing,
    pub filename: String,
    pub caption: Option<String>,
    pub upload_time: DateTime<Utc>,
    pub upload_date: String,
    pub download_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatePhoto {
    pub user: Thing,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub upload_date: String,
}

/// Upload time of a photo downloaded more than the quality threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct QualityUpload {
    pub user: Thing,
    pub upload_time: DateTime<Utc>,
}

pub const QUALITY_DOWNLOADS_MIN: i64 = 10;

pub struct PhotoDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "photo";

impl<'a> PhotoDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS user ON TABLE {TABLE_NAME} TYPE record<{USER_TABLE}>;
    DEFINE FIELD IF NOT EXISTS filename ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS caption ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS upload_time ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS upload_date ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS download_count ON TABLE {TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE INDEX IF NOT EXISTS user_idx ON TABLE {TABLE_NAME} COLUMNS user;
    DEFINE INDEX IF NOT EXISTS upload_date_idx ON TABLE {TABLE_NAME} COLUMNS upload_date;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    pub fn get_thing(&self, id: &str) -> CtxResult<Thing> {
        get_table_thing(TABLE_NAME, id).map_err(|_| self.not_found())
    }

    fn not_found(&self) -> CtxError {
        self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
            ident: "Photo".to_string(),
        })
    }

    pub async fn create(&self, input: CreatePhoto) -> CtxResult<Photo> {
        let photo: Option<Photo> = self
            .db
            .create(TABLE_NAME)
            .content(input)
            .await
            .map_err(CtxError::from(self.ctx))?;
        photo.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "Photo not created".to_string(),
            })
        })
    }

    pub async fn get(&self, photo: &Thing) -> CtxResult<Photo> {
        let mut res = self
            .db
            .query("SELECT * FROM $photo;")
            .bind(("photo", photo.clone()))
            .await?;
        let photo: Option<Photo> = res.take(0)?;
        photo.ok_or_else(|| self.not_found())
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<Photo> {
        let photo = self.get_thing(id)?;
        self.get(&photo).await
    }

    pub async fn get_view<T: ViewFieldSelector + DeserializeOwned>(
        &self,
        photo: &Thing,
    ) -> CtxResult<T> {
        let qry = format!("SELECT {} FROM $photo;", T::get_select_query_fields());
        let mut res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        let view: Option<T> = res.take(0)?;
        view.ok_or_else(|| self.not_found())
    }

    pub async fn list_view<T: ViewFieldSelector + DeserializeOwned>(&self) -> CtxResult<Vec<T>> {
        let qry = format!(
            "SELECT {} FROM {TABLE_NAME} ORDER BY upload_time {};",
            T::get_select_query_fields(),
            QryOrder::DESC
        );
        let mut res = self.db.query(qry).await?;
        let views: Vec<T> = res.take(0)?;
        Ok(views)
    }

    pub async fn get_by_user<T: ViewFieldSelector + DeserializeOwned>(
        &self,
        user: &Thing,
        pagination: &Pagination,
    ) -> CtxResult<Vec<T>> {
        self.get_by_users(vec![user.clone()], pagination).await
    }

    /// Photos of any of `users`, newest first.
    pub async fn get_by_users<T: ViewFieldSelector + DeserializeOwned>(
        &self,
        users: Vec<Thing>,
        pagination: &Pagination,
    ) -> CtxResult<Vec<T>> {
        if users.is_empty() {
            return Ok(vec![]);
        }
        let qry = format!(
            "SELECT {} FROM {TABLE_NAME} WHERE user INSIDE $users ORDER BY upload_time {} LIMIT $limit START $start;",
            T::get_select_query_fields(),
            QryOrder::DESC
        );
        let mut res = self
            .db
            .query(qry)
            .bind(("users", users))
            .bind(("limit", pagination.limit))
            .bind(("start", pagination.skip))
            .await?;
        let views: Vec<T> = res.take(0)?;
        Ok(views)
    }

    /// Photos with a tag containing `query`, case-insensitive, newest first.
    pub async fn search_by_tag<T: ViewFieldSelector + DeserializeOwned>(
        &self,
        query: &str,
        pagination: &Pagination,
    ) -> CtxResult<Vec<T>> {
        let qry = format!(
            "SELECT {} FROM {TABLE_NAME}
            WHERE id INSIDE (SELECT VALUE photo FROM {PHOTO_TAG_TABLE} WHERE string::contains(string::lowercase(tag_text), $query))
            ORDER BY upload_time {} LIMIT $limit START $start;",
            T::get_select_query_fields(),
            QryOrder::DESC
        );
        let mut res = self
            .db
            .query(qry)
            .bind(("query", query.to_lowercase()))
            .bind(("limit", pagination.limit))
            .bind(("start", pagination.skip))
            .await?;
        let views: Vec<T> = res.take(0)?;
        Ok(views)
    }

    /// Photos uploaded on `date` (`YYYY-MM-DD`), oldest first.
    pub async fn get_by_upload_date(&self, date: &str) -> CtxResult<Vec<Photo>> {
        let qry = format!(
            "SELECT * FROM {TABLE_NAME} WHERE upload_date = $date ORDER BY upload_time {};",
            QryOrder::ASC
        );
        let mut res = self.db.query(qry).bind(("date", date.to_string())).await?;
        let photos: Vec<Photo> = res.take(0)?;
        Ok(photos)
    }

    pub async fn increase_download_count(&self, photo: &Thing) -> CtxResult<Photo> {
        let mut res = self
            .db
            .query("UPDATE $photo SET download_count += 1 RETURN AFTER;")
            .bind(("photo", photo.clone()))
            .await?;
        let photo: Option<Photo> = res.take(0)?;
        photo.ok_or_else(|| self.not_found())
    }

    pub async fn quality_uploads(&self) -> CtxResult<Vec<QualityUpload>> {
        let qry = format!(
            "SELECT user, upload_time FROM {TABLE_NAME} WHERE download_count > $min;"
        );
        let mut res = self
            .db
            .query(qry)
            .bind(("min", QUALITY_DOWNLOADS_MIN))
            .await?;
        let uploads: Vec<QualityUpload> = res.take(0)?;
        Ok(uploads)
    }

    pub async fn user_photos_number(&self, user: &Thing) -> CtxResult<i64> {
        let qry = format!("SELECT count() AS count FROM {TABLE_NAME} WHERE user = $user GROUP ALL;");
        let mut res = self.db.query(qry).bind(("user", user.clone())).await?;
        let count: Option<i64> = res.take("count")?;
        Ok(count.unwrap_or(0))
    }

    pub async fn user_downloads_number(&self, user: &Thing) -> CtxResult<i64> {
        let qry = format!(
            "SELECT math::sum(download_count) AS total FROM {TABLE_NAME} WHERE user = $user GROUP ALL;"
        );
        let mut res = self.db.query(qry).bind(("user", user.clone())).await?;
        let total: Option<i64> = res.take("total")?;
        Ok(total.unwrap_or(0))
    }

    pub async fn user_filenames(&self, user: &Thing) -> CtxResult<Vec<String>> {
        let qry = format!("SELECT VALUE filename FROM {TABLE_NAME} WHERE user = $user;");
        let mut res = self.db.query(qry).bind(("user", user.clone())).await?;
        let names: Vec<String> = res.take(0)?;
        Ok(names)
    }

    /// Deletes the photo with its comments, ratings, tags and best photo records.
    pub async fn delete_cascade(&self, photo: &Thing) -> CtxResult<()> {
        let qry = format!(
            "
        BEGIN TRANSACTION;
        DELETE {COMMENT_TABLE} WHERE photo = $photo;
        DELETE {RATING_TABLE} WHERE photo = $photo;
        DELETE {PHOTO_TAG_TABLE} WHERE photo = $photo;
        DELETE {BEST_PHOTO_TABLE} WHERE photo = $photo;
        DELETE $photo;
        COMMIT TRANSACTION;
        "
        );
        let res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        res.check().map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
