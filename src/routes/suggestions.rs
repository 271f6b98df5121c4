use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::middleware::auth_user::AuthUser;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::QueryValidated;
use crate::models::view::user::UserView;
use crate::services::suggestion_service::SuggestionService;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/suggestions", get(get_suggestions))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SuggestionQuery {
    #[serde(default = "default_suggestion_limit")]
    #[validate(range(min = 1, max = 20, message = "Limit between 1 and 20"))]
    pub limit: usize,
}

fn default_suggestion_limit() -> usize {
    5
}

async fn get_suggestions(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    QueryValidated(query): QueryValidated<SuggestionQuery>,
) -> CtxResult<Json<Vec<UserView>>> {
    let users = SuggestionService::new(&state.db.client, &auth.ctx)
        .suggest(&auth.user, query.limit)
        .await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}
