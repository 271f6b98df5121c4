use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use futures::try_join;

use crate::entities::photo::photo_entity::PhotoDbService;
use crate::entities::user_auth::follow_entity::FollowDbService;
use crate::middleware::auth_user::AuthUser;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::analytics::AnalyticsView;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/analytics", get(get_analytics))
        .route("/analytics/", get(get_analytics))
}

async fn get_analytics(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
) -> CtxResult<Json<AnalyticsView>> {
    let photo_db_service = PhotoDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    };
    let follow_db_service = FollowDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    };
    let user = &auth.user.id;

    let (total_photos, total_downloads, total_followers, total_following) = try_join!(
        photo_db_service.user_photos_number(user),
        photo_db_service.user_downloads_number(user),
        follow_db_service.user_followers_number(user),
        follow_db_service.user_following_number(user),
    )?;

    Ok(Json(AnalyticsView {
        total_photos,
        total_followers,
        total_following,
        total_downloads,
    }))
}
