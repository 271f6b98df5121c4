use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::photo::comment_entity::{CommentDbService, CreateComment};
use crate::entities::photo::photo_entity::PhotoDbService;
use crate::middleware::auth_user::AuthUser;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::comment::CommentView;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route(
        "/photos/:photo_id/comments",
        get(get_comments).post(create_comment),
    )
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1, max = 500, message = "Between 1 and 500 characters"))]
    pub content: String,
}

async fn create_comment(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    Path(photo_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<CommentInput>,
) -> CtxResult<(StatusCode, Json<CommentView>)> {
    let photo = PhotoDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .get_by_id(&photo_id)
    .await?;

    let comment = CommentDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .create(CreateComment {
        photo: photo.id,
        user: auth.user.id.clone(),
        content: data.content,
    })
    .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

async fn get_comments(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(photo_id): Path<String>,
) -> CtxResult<Json<Vec<CommentView>>> {
    let photo = PhotoDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&photo_id)
    .await?;

    let comments = CommentDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_photo(&photo.id)
    .await?;
    Ok(Json(comments.into_iter().map(CommentView::from).collect()))
}
