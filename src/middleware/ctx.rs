use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use uuid::Uuid;

use super::error::{AppError, AppResult, CtxError, CtxResult};
use crate::middleware::mw_ctx::{CtxState, JWT_KEY};

#[derive(Clone, Debug)]
pub struct Ctx {
    result_user_id: AppResult<String>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(result_user_id: AppResult<String>, req_id: Uuid) -> Self {
        Self {
            result_user_id,
            req_id,
        }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    /// Record key of the authenticated user.
    pub fn user_id(&self) -> CtxResult<String> {
        self.result_user_id
            .clone()
            .map_err(|error| self.to_ctx_error(error))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            req_id: self.req_id,
            error,
        }
    }
}

/// Token from the `Authorization: Bearer` header, or from the login cookie
/// when its value carries the `Bearer ` prefix.
pub fn extract_bearer_token(parts: &Parts) -> Option<String> {
    if let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    let cookies = CookieJar::from_headers(&parts.headers);
    cookies.get(JWT_KEY).and_then(|cookie| {
        cookie
            .value()
            .strip_prefix("Bearer ")
            .map(|token| token.trim().to_string())
    })
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let jwt_user_id = match extract_bearer_token(parts) {
            Some(token) => state
                .jwt
                .decode(&token)
                .map(|claims| claims.sub)
                .map_err(|source| AppError::AuthFailJwtInvalid { source }),
            None => Err(AppError::AuthFailNoJwt),
        };

        Ok(Ctx::new(jwt_user_id, Uuid::new_v4()))
    }
}
