use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::photo::photo_entity::TABLE_NAME as PHOTO_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};

/// Winner of one day, the record key is the date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPhoto {
    pub id: Thing,
    pub date: String,
    pub photo: Thing,
    pub selected_at: DateTime<Utc>,
}

pub struct BestPhotoDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "best_photo";

impl<'a> BestPhotoDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS date ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS photo ON TABLE {TABLE_NAME} TYPE record<{PHOTO_TABLE}>;
    DEFINE FIELD IF NOT EXISTS selected_at ON TABLE {TABLE_NAME} TYPE datetime VALUE time::now();
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    pub async fn get_by_date(&self, date: &str) -> CtxResult<Option<BestPhoto>> {
        let qry = format!("SELECT * FROM type::thing('{TABLE_NAME}', $date);");
        let mut res = self.db.query(qry).bind(("date", date.to_string())).await?;
        let best: Option<BestPhoto> = res.take(0)?;
        Ok(best)
    }

    pub async fn upsert(&self, date: &str, photo: &Thing) -> CtxResult<BestPhoto> {
        let qry = format!(
            "UPSERT type::thing('{TABLE_NAME}', $date) SET date = $date, photo = $photo RETURN AFTER;"
        );
        let mut res = self
            .db
            .query(qry)
            .bind(("date", date.to_string()))
            .bind(("photo", photo.clone()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let best: Option<BestPhoto> = res.take(0).map_err(CtxError::from(self.ctx))?;
        best.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "Best photo not stored".to_string(),
            })
        })
    }
}
