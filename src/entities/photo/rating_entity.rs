use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::photo::photo_entity::TABLE_NAME as PHOTO_TABLE;
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: Thing,
    pub photo: Thing,
    pub user: Thing,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateRating {
    pub photo: Thing,
    pub user: Thing,
    pub score: i64,
}

pub struct RatingDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "rating";

impl<'a> RatingDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS photo ON TABLE {TABLE_NAME} TYPE record<{PHOTO_TABLE}>;
    DEFINE FIELD IF NOT EXISTS user ON TABLE {TABLE_NAME} TYPE record<{USER_TABLE}>;
    DEFINE FIELD IF NOT EXISTS score ON TABLE {TABLE_NAME} TYPE int ASSERT $value >= 1 AND $value <= 5;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE INDEX IF NOT EXISTS photo_idx ON TABLE {TABLE_NAME} COLUMNS photo;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    pub async fn create(&self, input: CreateRating) -> CtxResult<Rating> {
        let rating: Option<Rating> = self
            .db
            .create(TABLE_NAME)
            .content(input)
            .await
            .map_err(CtxError::from(self.ctx))?;
        rating.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "Rating not created".to_string(),
            })
        })
    }

    pub async fn get_by_photo(&self, photo: &Thing) -> CtxResult<Vec<Rating>> {
        let qry = format!("SELECT * FROM {TABLE_NAME} WHERE photo = $photo ORDER BY created_at ASC;");
        let mut res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        let ratings: Vec<Rating> = res.take(0)?;
        Ok(ratings)
    }

    /// Mean score, `0.0` when the photo has no ratings.
    pub async fn average_by_photo(&self, photo: &Thing) -> CtxResult<f64> {
        let qry = format!(
            "SELECT math::mean(score) AS avg FROM {TABLE_NAME} WHERE photo = $photo GROUP ALL;"
        );
        let mut res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        let avg: Option<f64> = res.take("avg")?;
        Ok(avg.unwrap_or(0.0))
    }
}
