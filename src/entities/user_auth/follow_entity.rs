use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, AppResult, CtxError, CtxResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: Thing,
    pub r#in: Thing,
    pub out: Thing,
    pub created_at: DateTime<Utc>,
}

/// Number of follow edges pointing at `out`.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowCount {
    pub out: Thing,
    pub nr: i64,
}

pub struct FollowDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "follow";

impl<'a> FollowDbService<'a> {
    pub async fn mutate_db(&self) -> AppResult<()> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} TYPE RELATION IN {USER_TABLE} OUT {USER_TABLE} SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS in_out_unique_idx ON {TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    pub async fn is_following(&self, user: &Thing, follows: &Thing) -> CtxResult<bool> {
        let qry = format!(
            "SELECT count() AS count FROM {TABLE_NAME} WHERE in = $in AND out = $out GROUP ALL;"
        );
        let mut res = self
            .db
            .query(qry)
            .bind(("in", user.clone()))
            .bind(("out", follows.clone()))
            .await?;
        let count: Option<i64> = res.take("count")?;
        Ok(count.unwrap_or(0) > 0)
    }

    pub async fn create_follow(&self, user: &Thing, follows: &Thing) -> CtxResult<Follow> {
        let qry = format!("RELATE $in->{TABLE_NAME}->$out;");
        let mut res = self
            .db
            .query(qry)
            .bind(("in", user.clone()))
            .bind(("out", follows.clone()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let follow: Option<Follow> = res.take(0).map_err(CtxError::from(self.ctx))?;
        follow.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "Follow not created".to_string(),
            })
        })
    }

    pub async fn remove_follow(&self, user: &Thing, unfollow: &Thing) -> CtxResult<()> {
        let qry = format!("DELETE {TABLE_NAME} WHERE in = $in AND out = $out;");
        let res = self
            .db
            .query(qry)
            .bind(("in", user.clone()))
            .bind(("out", unfollow.clone()))
            .await?;
        res.check().map_err(CtxError::from(self.ctx))?;
        Ok(())
    }

    pub async fn user_following(&self, user: &Thing) -> CtxResult<Vec<Follow>> {
        let qry = format!("SELECT * FROM {TABLE_NAME} WHERE in = $user ORDER BY created_at DESC;");
        let mut res = self.db.query(qry).bind(("user", user.clone())).await?;
        let follows: Vec<Follow> = res.take(0)?;
        Ok(follows)
    }

    pub async fn user_following_ids(&self, user: &Thing) -> CtxResult<Vec<Thing>> {
        let qry = format!("SELECT VALUE out FROM {TABLE_NAME} WHERE in = $user;");
        let mut res = self.db.query(qry).bind(("user", user.clone())).await?;
        let ids: Vec<Thing> = res.take(0)?;
        Ok(ids)
    }

    pub async fn user_followers_number(&self, user: &Thing) -> CtxResult<i64> {
        self.count_where("out = $user", user).await
    }

    pub async fn user_following_number(&self, user: &Thing) -> CtxResult<i64> {
        self.count_where("in = $user", user).await
    }

    async fn count_where(&self, condition: &str, user: &Thing) -> CtxResult<i64> {
        let qry = format!("SELECT count() AS count FROM {TABLE_NAME} WHERE {condition} GROUP ALL;");
        let mut res = self.db.query(qry).bind(("user", user.clone())).await?;
        let count: Option<i64> = res.take("count")?;
        Ok(count.unwrap_or(0))
    }

    /// Follower count of every followed user.
    pub async fn follower_counts(&self) -> CtxResult<Vec<FollowCount>> {
        let qry = format!("SELECT out, count() AS nr FROM {TABLE_NAME} GROUP BY out;");
        let mut res = self.db.query(qry).await?;
        let counts: Vec<FollowCount> = res.take(0)?;
        Ok(counts)
    }

    /// How many of `followers` follow each user.
    pub async fn follower_counts_among(&self, followers: Vec<Thing>) -> CtxResult<Vec<FollowCount>> {
        if followers.is_empty() {
            return Ok(vec![]);
        }
        let qry = format!(
            "SELECT out, count() AS nr FROM {TABLE_NAME} WHERE in INSIDE $followers GROUP BY out;"
        );
        let mut res = self.db.query(qry).bind(("followers", followers)).await?;
        let counts: Vec<FollowCount> = res.take(0)?;
        Ok(counts)
    }
}
