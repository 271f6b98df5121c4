use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::middleware::auth_user::AuthUser;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::photo::BestPhotoView;
use crate::services::best_photo_service::BestPhotoService;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/best-photo-today", get(get_best_photo_today))
}

async fn get_best_photo_today(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
) -> CtxResult<Json<BestPhotoView>> {
    let today = Utc::now().date_naive();
    let best = BestPhotoService::new(&state.db.client, &auth.ctx)
        .get_or_calculate(today)
        .await?;
    Ok(Json(best))
}
