use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::photo::photo_entity::TABLE_NAME as PHOTO_TABLE;
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};
use crate::middleware::utils::db_utils::QryOrder;
use crate::middleware::utils::string_utils::get_table_thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Thing,
    pub photo: Thing,
    pub user: Thing,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateComment {
    pub photo: Thing,
    pub user: Thing,
    pub content: String,
}

pub struct CommentDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "comment";

impl<'a> CommentDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS photo ON TABLE {TABLE_NAME} TYPE record<{PHOTO_TABLE}>;
    DEFINE FIELD IF NOT EXISTS user ON TABLE {TABLE_NAME} TYPE record<{USER_TABLE}>;
    DEFINE FIELD IF NOT EXISTS content ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE INDEX IF NOT EXISTS photo_idx ON TABLE {TABLE_NAME} COLUMNS photo;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    fn not_found(&self) -> CtxError {
        self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
            ident: "Comment".to_string(),
        })
    }

    pub async fn create(&self, input: CreateComment) -> CtxResult<Comment> {
        let comment: Option<Comment> = self
            .db
            .create(TABLE_NAME)
            .content(input)
            .await
            .map_err(CtxError::from(self.ctx))?;
        comment.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "Comment not created".to_string(),
            })
        })
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<Comment> {
        let comment = get_table_thing(TABLE_NAME, id).map_err(|_| self.not_found())?;
        let mut res = self
            .db
            .query("SELECT * FROM $comment;")
            .bind(("comment", comment))
            .await?;
        let comment: Option<Comment> = res.take(0)?;
        comment.ok_or_else(|| self.not_found())
    }

    pub async fn get_by_photo(&self, photo: &Thing) -> CtxResult<Vec<Comment>> {
        let qry = format!(
            "SELECT * FROM {TABLE_NAME} WHERE photo = $photo ORDER BY created_at {};",
            QryOrder::DESC
        );
        let mut res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        let comments: Vec<Comment> = res.take(0)?;
        Ok(comments)
    }

    pub async fn count_by_photo(&self, photo: &Thing) -> CtxResult<i64> {
        let qry = format!("SELECT count() AS count FROM {TABLE_NAME} WHERE photo = $photo GROUP ALL;");
        let mut res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        let count: Option<i64> = res.take("count")?;
        Ok(count.unwrap_or(0))
    }

    pub async fn list(&self) -> CtxResult<Vec<Comment>> {
        let qry = format!("SELECT * FROM {TABLE_NAME} ORDER BY created_at {};", QryOrder::DESC);
        let mut res = self.db.query(qry).await?;
        let comments: Vec<Comment> = res.take(0)?;
        Ok(comments)
    }

    pub async fn delete(&self, comment: &Thing) -> CtxResult<()> {
        let res = self
            .db
            .query("DELETE $comment;")
            .bind(("comment", comment.clone()))
            .await?;
        res.check().map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
