use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::photo::photo_entity::TABLE_NAME as PHOTO_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppResult, CtxError, CtxResult};

pub struct PhotoTagDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "photo_tag";

impl<'a> PhotoTagDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS photo ON TABLE {TABLE_NAME} TYPE record<{PHOTO_TABLE}>;
    DEFINE FIELD IF NOT EXISTS tag_text ON TABLE {TABLE_NAME} TYPE string ASSERT string::len($value) > 0;
    DEFINE INDEX IF NOT EXISTS photo_idx ON TABLE {TABLE_NAME} COLUMNS photo;
    DEFINE INDEX IF NOT EXISTS tag_text_idx ON TABLE {TABLE_NAME} COLUMNS tag_text;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    pub async fn add_tags(&self, photo: &Thing, tags: Vec<String>) -> CtxResult<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let qry = format!(
            "FOR $tag IN $tags {{ CREATE {TABLE_NAME} SET photo = $photo, tag_text = $tag; }};"
        );
        let res = self
            .db
            .query(qry)
            .bind(("photo", photo.clone()))
            .bind(("tags", tags))
            .await?;
        res.check().map_err(CtxError::from(self.ctx))?;
        Ok(())
    }

    pub async fn get_by_photo(&self, photo: &Thing) -> CtxResult<Vec<String>> {
        let qry = format!("SELECT VALUE tag_text FROM {TABLE_NAME} WHERE photo = $photo;");
        let mut res = self.db.query(qry).bind(("photo", photo.clone())).await?;
        let tags: Vec<String> = res.take(0)?;
        Ok(tags)
    }
}
