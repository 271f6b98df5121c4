use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::ctx::Ctx;
use super::error::{AppError, CtxError};
use crate::entities::user_auth::local_user_entity::{LocalUser, LocalUserDbService};
use crate::middleware::mw_ctx::CtxState;

/// Authenticated request: a valid token whose subject still exists.
#[derive(Debug)]
pub struct AuthUser {
    pub user: LocalUser,
    pub ctx: Ctx,
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AuthUser {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let ctx = Ctx::from_request_parts(parts, state).await?;
        let user_id = ctx.user_id()?;

        let user = LocalUserDbService {
            db: &state.db.client,
            ctx: &ctx,
        }
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ctx.to_ctx_error(AppError::AuthFailNoJwt))?;

        Ok(AuthUser { user, ctx })
    }
}

/// Authenticated user flagged as photographer.
#[derive(Debug)]
pub struct PhotographerUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for PhotographerUser {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.user.is_photographer {
            return Err(auth.ctx.to_ctx_error(AppError::AuthorizationFail {
                required: "Photographer".to_string(),
            }));
        }
        Ok(PhotographerUser(auth))
    }
}

#[derive(Debug)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AdminUser {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.user.is_admin {
            return Err(auth.ctx.to_ctx_error(AppError::AuthorizationFail {
                required: "Admin".to_string(),
            }));
        }
        Ok(AdminUser(auth))
    }
}
