use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tower_cookies::{Cookie, Cookies};

use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::{CtxState, JWT_KEY};
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::user::{AccessTokenView, UserView};
use crate::services::auth_service::{AuthLoginInput, AuthRegisterInput, AuthService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

async fn register(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    JsonOrFormValidated(data): JsonOrFormValidated<AuthRegisterInput>,
) -> CtxResult<(StatusCode, Json<UserView>)> {
    let user = AuthService::new(&state.db.client, &ctx, &state.jwt)
        .register(data)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn login(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
    JsonOrFormValidated(data): JsonOrFormValidated<AuthLoginInput>,
) -> CtxResult<Json<AccessTokenView>> {
    let (token, _) = AuthService::new(&state.db.client, &ctx, &state.jwt)
        .login_password(data)
        .await?;

    cookies.add(
        Cookie::build((JWT_KEY, format!("Bearer {token}")))
            .path("/")
            .http_only(true)
            .build(),
    );

    Ok(Json(AccessTokenView::bearer(token)))
}
