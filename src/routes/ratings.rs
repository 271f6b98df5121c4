use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::photo::photo_entity::PhotoDbService;
use crate::entities::photo::rating_entity::{CreateRating, RatingDbService};
use crate::middleware::auth_user::AuthUser;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::rating::RatingView;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route(
            "/photos/:photo_id/ratings",
            get(get_ratings).post(create_rating),
        )
        .route("/photos/:photo_id/ratings/average", get(get_average_rating))
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RatingInput {
    #[validate(range(min = 1, max = 5, message = "Score between 1 and 5"))]
    pub score: i64,
}

async fn create_rating(
    State(state): State<Arc<CtxState>>,
    auth: AuthUser,
    Path(photo_id): Path<String>,
    JsonOrFormValidated(data): JsonOrFormValidated<RatingInput>,
) -> CtxResult<(StatusCode, Json<RatingView>)> {
    let photo = PhotoDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .get_by_id(&photo_id)
    .await?;

    let rating = RatingDbService {
        db: &state.db.client,
        ctx: &auth.ctx,
    }
    .create(CreateRating {
        photo: photo.id,
        user: auth.user.id.clone(),
        score: data.score,
    })
    .await?;
    Ok((StatusCode::CREATED, Json(rating.into())))
}

async fn get_ratings(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(photo_id): Path<String>,
) -> CtxResult<Json<Vec<RatingView>>> {
    let photo = PhotoDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&photo_id)
    .await?;

    let ratings = RatingDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_photo(&photo.id)
    .await?;
    Ok(Json(ratings.into_iter().map(RatingView::from).collect()))
}

async fn get_average_rating(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(photo_id): Path<String>,
) -> CtxResult<Json<f64>> {
    let photo = PhotoDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&photo_id)
    .await?;

    let average = RatingDbService {
        db: &state.db.client,
        ctx: &ctx,
    }
    .average_by_photo(&photo.id)
    .await?;
    Ok(Json(average))
}
