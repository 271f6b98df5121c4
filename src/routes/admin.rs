use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::entities::photo::comment_entity::CommentDbService;
use crate::entities::user_auth::local_user_entity::LocalUserDbService;
use crate::middleware::auth_user::AdminUser;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::comment::CommentView;
use crate::models::view::photo::PhotoView;
use crate::models::view::user::{DetailView, UserView};
use crate::routes::photos::photo_service;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/admin/users", get(get_users))
        .route("/admin/users/:user_id", delete(delete_user))
        .route("/admin/photos", get(get_photos))
        .route("/admin/photos/:photo_id", delete(delete_photo))
        .route("/admin/comments", get(get_comments))
        .route("/admin/comments/:comment_id", delete(delete_comment))
}

async fn get_users(
    State(state): State<Arc<CtxState>>,
    AdminUser(auth): AdminUser,
) -> CtxResult<Json<Vec<UserView>>> {
    let users = LocalUserDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .list()
    .await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

async fn delete_user(
    State(state): State<Arc<CtxState>>,
    AdminUser(auth): AdminUser,
    Path(user_id): Path<String>,
) -> CtxResult<Json<DetailView>> {
    photo_service(&state, &auth.ctx)
        .delete_user(&user_id)
        .await?;
    Ok(Json(DetailView {
        detail: format!("User {user_id} deleted"),
    }))
}

async fn get_photos(
    State(state): State<Arc<CtxState>>,
    AdminUser(auth): AdminUser,
) -> CtxResult<Json<Vec<PhotoView>>> {
    let photos = photo_service(&state, &auth.ctx).list().await?;
    Ok(Json(photos))
}

async fn delete_photo(
    State(state): State<Arc<CtxState>>,
    AdminUser(auth): AdminUser,
    Path(photo_id): Path<String>,
) -> CtxResult<Json<DetailView>> {
    photo_service(&state, &auth.ctx).delete(&photo_id).await?;
    Ok(Json(DetailView {
        detail: format!("Photo {photo_id} deleted"),
    }))
}

async fn get_comments(
    State(state): State<Arc<CtxState>>,
    AdminUser(auth): AdminUser,
) -> CtxResult<Json<Vec<CommentView>>> {
    let comments = CommentDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .list()
    .await?;
    Ok(Json(comments.into_iter().map(CommentView::from).collect()))
}

async fn delete_comment(
    State(state): State<Arc<CtxState>>,
    AdminUser(auth): AdminUser,
    Path(comment_id): Path<String>,
) -> CtxResult<Json<DetailView>> {
    let comment_db_service = CommentDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    };
    let comment = comment_db_service.get_by_id(&comment_id).await?;
    comment_db_service.delete(&comment.id).await?;
    Ok(Json(DetailView {
        detail: format!("Comment {comment_id} deleted"),
    }))
}
