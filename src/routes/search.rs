use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::middleware::auth_user::AuthUser;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::Pagination;
use crate::middleware::utils::extractor_utils::QueryValidated;
use crate::models::view::photo::PhotoListView;
use crate::routes::photos::photo_service;
use crate::utils::validate_utils::trim_string;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/search", get(search_photos))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Min 1 character"))]
    pub query: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_search_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
}

fn default_search_limit() -> i64 {
    20
}

async fn search_photos(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    QueryValidated(query): QueryValidated<SearchQuery>,
) -> CtxResult<Json<PhotoListView>> {
    let pagination = Pagination::new(query.skip, query.limit);
    let items = photo_service(&state, &auth.ctx)
        .search(&query.query, &pagination)
        .await?;
    Ok(Json(PhotoListView {
        items,
        skip: pagination.skip,
        limit: pagination.limit,
    }))
}
