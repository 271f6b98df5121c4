use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::entities::user_auth::follow_entity::FollowDbService;
use crate::entities::user_auth::local_user_entity::LocalUserDbService;
use crate::middleware::auth_user::AuthUser;
use crate::middleware::error::{AppError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::follow::FollowView;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/follow/:followee_id", post(follow_user).delete(unfollow_user))
        .route("/followees", get(get_followees))
}

async fn follow_user(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    Path(followee_id): Path<String>,
) -> CtxResult<Json<FollowView>> {
    let ctx = &auth.ctx;
    let user_db_service = LocalUserDbService {
        db: &state.db.client,
        ctx,
    };
    let follow_db_service = FollowDbService {
        db: &state.db.client,
        ctx,
    };

    let followee = user_db_service.find_by_id(&followee_id).await?;
    if matches!(&followee, Some(f) if f.id == auth.user.id) {
        return Err(ctx.to_ctx_error(AppError::Generic {
            description: "Cannot follow yourself".to_string(),
        }));
    }
    let followee = followee.ok_or_else(|| {
        ctx.to_ctx_error(AppError::EntityFailIdNotFound {
            ident: "User".to_string(),
        })
    })?;

    if follow_db_service
        .is_following(&auth.user.id, &followee.id)
        .await?
    {
        return Err(ctx.to_ctx_error(AppError::Generic {
            description: "Already following this user".to_string(),
        }));
    }

    let follow = follow_db_service
        .create_follow(&auth.user.id, &followee.id)
        .await?;
    Ok(Json(follow.into()))
}

async fn unfollow_user(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    Path(followee_id): Path<String>,
) -> CtxResult<StatusCode> {
    let followee = LocalUserDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .get_thing(&followee_id)?;

    FollowDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .remove_follow(&auth.user.id, &followee)
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_followees(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
) -> CtxResult<Json<Vec<FollowView>>> {
    let follows = FollowDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .user_following(&auth.user.id)
    .await?;
    Ok(Json(follows.into_iter().map(FollowView::from).collect()))
}
