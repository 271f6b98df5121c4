use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use serde::Deserialize;
use tempfile::NamedTempFile;
use validator::Validate;

use crate::interfaces::file_storage::FileStorageInterface;
use crate::interfaces::tag_suggester::TagSuggesterInterface;
use crate::middleware::auth_user::{AuthUser, PhotographerUser};
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::Pagination;
use crate::middleware::utils::extractor_utils::QueryValidated;
use crate::models::view::photo::{PhotoListView, PhotoView, TagSuggestionView};
use crate::services::photo_service::{PhotoCreateInput, PhotoService};
use crate::utils::file::convert::convert_field_file_data;
use crate::utils::validate_utils::validate_tags;

pub fn routes(upload_max_size_mb: u64) -> Router<Arc<CtxState>> {
    let max_bytes = (upload_max_size_mb * 1024 * 1024) as usize;
    Router::new()
        .route("/photos/upload", post(suggest_tags))
        .route("/photos", post(create_photo))
        .route("/photos/", post(create_photo))
        .route("/photos/feed", get(get_feed))
        .route("/photos/:photo_id", get(get_photo))
        .route("/photos/:photo_id/download", get(download_photo))
        .route("/users/:user_id/photos", get(get_user_photos))
        .layer(DefaultBodyLimit::max(max_bytes))
}

#[derive(TryFromMultipart)]
pub struct PhotoUploadInput {
    #[form_data(limit = "unlimited")]
    pub file: FieldData<NamedTempFile>,
}

#[derive(TryFromMultipart, Validate)]
pub struct PhotoInput {
    #[validate(length(max = 2000, message = "Max 2000 characters"))]
    pub caption: Option<String>,
    #[validate(
        length(max = 5, message = "Max 5 tags"),
        custom(function = validate_tags)
    )]
    pub selected_tags: Vec<String>,
    #[form_data(limit = "unlimited")]
    pub file: FieldData<NamedTempFile>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserPhotosQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_user_photos_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
}

fn default_user_photos_limit() -> i64 {
    100
}

async fn suggest_tags(
    State(state): State<Arc<CtxState>>,
    PhotographerUser(auth): PhotographerUser,
    TypedMultipart(data): TypedMultipart<PhotoUploadInput>,
) -> CtxResult<Json<TagSuggestionView>> {
    let file = convert_field_file_data(data.file).map_err(CtxError::from(&auth.ctx))?;
    let suggestion = photo_service(&state, &auth.ctx).suggest_tags(file).await?;
    Ok(Json(suggestion))
}

async fn create_photo(
    State(state): State<Arc<CtxState>>,
    PhotographerUser(auth): PhotographerUser,
    TypedMultipart(data): TypedMultipart<PhotoInput>,
) -> CtxResult<Json<PhotoView>> {
    data.validate().map_err(CtxError::from(&auth.ctx))?;
    let file = convert_field_file_data(data.file).map_err(CtxError::from(&auth.ctx))?;

    let photo = photo_service(&state, &auth.ctx)
        .create(
            &auth.user,
            PhotoCreateInput {
                caption: data.caption,
                selected_tags: data.selected_tags,
                file,
            },
        )
        .await?;
    Ok(Json(photo))
}

async fn get_photo(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    Path(photo_id): Path<String>,
) -> CtxResult<Json<PhotoView>> {
    let photo = photo_service(&state, &auth.ctx).get_view(&photo_id).await?;
    Ok(Json(photo))
}

async fn download_photo(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    Path(photo_id): Path<String>,
) -> CtxResult<Response> {
    let (photo, bytes) = photo_service(&state, &auth.ctx).download(&photo_id).await?;
    let headers = [
        (CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", photo.filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

async fn get_feed(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    QueryValidated(pagination): QueryValidated<Pagination>,
) -> CtxResult<Json<PhotoListView>> {
    let items = photo_service(&state, &auth.ctx)
        .feed(&auth.user, &pagination)
        .await?;
    Ok(Json(PhotoListView {
        items,
        skip: pagination.skip,
        limit: pagination.limit,
    }))
}

async fn get_user_photos(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_id): Path<String>,
    QueryValidated(query): QueryValidated<UserPhotosQuery>,
) -> CtxResult<Json<PhotoListView>> {
    let pagination = Pagination::new(query.skip, query.limit);
    let items = photo_service(&state, &ctx)
        .user_photos(&user_id, &pagination)
        .await?;
    Ok(Json(PhotoListView {
        items,
        skip: pagination.skip,
        limit: pagination.limit,
    }))
}

type StatePhotoService<'a> = PhotoService<
    'a,
    dyn FileStorageInterface + Send + Sync,
    dyn TagSuggesterInterface + Send + Sync,
>;

pub(crate) fn photo_service<'a>(state: &'a CtxState, ctx: &'a Ctx) -> StatePhotoService<'a> {
    PhotoService::new(
        &state.db.client,
        ctx,
        state.file_storage.as_ref(),
        state.tag_suggester.as_ref(),
    )
}
