use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::entities::photo::best_photo_entity::BestPhotoDbService;
use crate::entities::photo::comment_entity::CommentDbService;
use crate::entities::photo::photo_entity::PhotoDbService;
use crate::entities::photo::photo_tag_entity::PhotoTagDbService;
use crate::entities::photo::rating_entity::RatingDbService;
use crate::entities::user_auth::follow_entity::FollowDbService;
use crate::entities::user_auth::local_user_entity::LocalUserDbService;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::AppResult;
use crate::middleware::mw_ctx::CtxState;
use crate::routes::{
    admin, analytics, auth_routes, best_photo, comments, follows, photos, ratings, search,
    suggestions,
};
use crate::services::auth_service::{AuthRegisterInput, AuthService};
use crate::utils::file::local_file_storage::UPLOADS_URL_PREFIX;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    let db = &database.client;
    let c = Ctx::new(Ok("migrations".to_string()), Uuid::new_v4());

    LocalUserDbService { db, ctx: &c }.mutate_db().await?;
    FollowDbService { db, ctx: &c }.mutate_db().await?;
    PhotoDbService { db, ctx: &c }.mutate_db().await?;
    PhotoTagDbService { db, ctx: &c }.mutate_db().await?;
    CommentDbService { db, ctx: &c }.mutate_db().await?;
    RatingDbService { db, ctx: &c }.mutate_db().await?;
    BestPhotoDbService { db, ctx: &c }.mutate_db().await?;
    Ok(())
}

/// Registers the `admin` account when ADMIN_EMAIL and ADMIN_PASSWORD are set
/// and the email is still free.
pub async fn create_default_admin(ctx_state: &CtxState, config: &AppConfig) {
    let (Some(email), Some(password)) = (
        config.admin_email.as_ref(),
        config.admin_password.as_ref(),
    ) else {
        return;
    };

    let c = Ctx::new(Ok("create_default_admin".to_string()), Uuid::new_v4());
    let user_repository = LocalUserDbService {
        db: &ctx_state.db.client,
        ctx: &c,
    };
    match user_repository.find_by_email(email).await {
        Ok(Some(_)) => return,
        Ok(None) => {}
        Err(err) => {
            warn!("->> admin lookup failed: {:?}", err.error);
            return;
        }
    }

    let result = AuthService::new(&ctx_state.db.client, &c, &ctx_state.jwt)
        .register_admin(AuthRegisterInput {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: email.clone(),
            password: password.clone(),
            is_photographer: false,
        })
        .await;

    match result {
        Ok(user) => info!("->> created admin account {}", user.email),
        Err(err) => warn!("->> admin account not created: {:?}", err.error),
    }
}

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/", get(get_welcome))
        .route("/hc", get(get_hc))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&ctx_state.upload_dir))
        .merge(auth_routes::routes())
        .merge(photos::routes(ctx_state.upload_max_size_mb))
        .merge(follows::routes())
        .merge(comments::routes())
        .merge(ratings::routes())
        .merge(search::routes())
        .merge(best_photo::routes())
        .merge(suggestions::routes())
        .merge(analytics::routes())
        .merge(admin::routes())
        .with_state(ctx_state.clone())
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(ctx_state.frontend_url.as_deref()))
}

/// Credentials are only allowed for an explicit frontend origin.
fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let origin = frontend_url.and_then(|url| HeaderValue::from_str(url).ok());
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]),
        None => CorsLayer::permissive(),
    }
}

async fn get_welcome() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Photo Management App" }))
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
