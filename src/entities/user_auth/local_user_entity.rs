use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::photo::best_photo_entity::TABLE_NAME as BEST_PHOTO_TABLE;
use crate::entities::photo::comment_entity::TABLE_NAME as COMMENT_TABLE;
use crate::entities::photo::photo_entity::TABLE_NAME as PHOTO_TABLE;
use crate::entities::photo::photo_tag_entity::TABLE_NAME as PHOTO_TAG_TABLE;
use crate::entities::photo::rating_entity::TABLE_NAME as RATING_TABLE;
use crate::entities::user_auth::follow_entity::TABLE_NAME as FOLLOW_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};
use crate::middleware::utils::db_utils::IdentIdName;
use crate::middleware::utils::string_utils::get_table_thing;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalUser {
    pub id: Thing,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_photographer: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateLocalUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_photographer: bool,
    pub is_admin: bool,
}

pub struct LocalUserDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "local_user";

impl<'a> LocalUserDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS username ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS email ON TABLE {TABLE_NAME} TYPE string VALUE string::lowercase($value);
    DEFINE FIELD IF NOT EXISTS password_hash ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS is_photographer ON TABLE {TABLE_NAME} TYPE bool DEFAULT false;
    DEFINE FIELD IF NOT EXISTS is_admin ON TABLE {TABLE_NAME} TYPE bool DEFAULT false;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE INDEX IF NOT EXISTS username_idx ON TABLE {TABLE_NAME} COLUMNS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS email_idx ON TABLE {TABLE_NAME} COLUMNS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS is_photographer_idx ON TABLE {TABLE_NAME} COLUMNS is_photographer;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    pub fn get_thing(&self, id: &str) -> CtxResult<Thing> {
        get_table_thing(TABLE_NAME, id).map_err(CtxError::from(self.ctx))
    }

    pub async fn create(&self, input: CreateLocalUser) -> CtxResult<LocalUser> {
        let user: Option<LocalUser> = self
            .db
            .create(TABLE_NAME)
            .content(input)
            .await
            .map_err(CtxError::from(self.ctx))?;
        user.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "User not created".to_string(),
            })
        })
    }

    pub async fn find(&self, ident: IdentIdName) -> CtxResult<Option<LocalUser>> {
        let qry = format!(
            "SELECT * FROM {TABLE_NAME} WHERE {} LIMIT 1;",
            ident.to_where_clause()
        );
        let mut res = match ident {
            IdentIdName::Id(id) => self.db.query(qry).bind(("ident", id)).await?,
            IdentIdName::ColumnIdent { val, .. } => self.db.query(qry).bind(("ident", val)).await?,
        };
        let user: Option<LocalUser> = res.take(0)?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> CtxResult<Option<LocalUser>> {
        let Ok(thing) = get_table_thing(TABLE_NAME, id) else {
            return Ok(None);
        };
        self.find(IdentIdName::Id(thing)).await
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<LocalUser> {
        self.find_by_id(id).await?.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: "User".to_string(),
            })
        })
    }

    pub async fn find_by_email(&self, email: &str) -> CtxResult<Option<LocalUser>> {
        self.find(IdentIdName::ColumnIdent {
            column: "email".to_string(),
            val: email.trim().to_lowercase(),
        })
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> CtxResult<Option<LocalUser>> {
        self.find(IdentIdName::ColumnIdent {
            column: "username".to_string(),
            val: username.to_string(),
        })
        .await
    }

    pub async fn list(&self) -> CtxResult<Vec<LocalUser>> {
        let mut res = self
            .db
            .query(format!("SELECT * FROM {TABLE_NAME} ORDER BY created_at ASC;"))
            .await?;
        let users: Vec<LocalUser> = res.take(0)?;
        Ok(users)
    }

    /// Photographers other than `user` and not in `exclude`.
    pub async fn photographer_candidates(
        &self,
        user: &Thing,
        exclude: Vec<Thing>,
    ) -> CtxResult<Vec<LocalUser>> {
        let qry = format!(
            "SELECT * FROM {TABLE_NAME} WHERE is_photographer = true AND id != $user AND id NOTINSIDE $exclude ORDER BY username ASC;"
        );
        let mut res = self
            .db
            .query(qry)
            .bind(("user", user.clone()))
            .bind(("exclude", exclude))
            .await?;
        let users: Vec<LocalUser> = res.take(0)?;
        Ok(users)
    }

    /// Deletes the user with their photos and everything attached to them.
    pub async fn delete_cascade(&self, user: &Thing) -> CtxResult<()> {
        let qry = format!(
            "
        BEGIN TRANSACTION;
        LET $photos = (SELECT VALUE id FROM {PHOTO_TABLE} WHERE user = $user);
        DELETE {COMMENT_TABLE} WHERE user = $user OR photo INSIDE $photos;
        DELETE {RATING_TABLE} WHERE user = $user OR photo INSIDE $photos;
        DELETE {PHOTO_TAG_TABLE} WHERE photo INSIDE $photos;
        DELETE {BEST_PHOTO_TABLE} WHERE photo INSIDE $photos;
        DELETE {FOLLOW_TABLE} WHERE in = $user OR out = $user;
        DELETE {PHOTO_TABLE} WHERE user = $user;
        DELETE $user;
        COMMIT TRANSACTION;
        "
        );
        let res = self.db.query(qry).bind(("user", user.clone())).await?;
        res.check().map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
