use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    database::client::Db,
    entities::user_auth::local_user_entity::{CreateLocalUser, LocalUser, LocalUserDbService},
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        utils::string_utils::thing_key,
    },
    utils::{
        hash::{hash_password, verify_password},
        jwt::JWT,
        validate_utils::trim_string,
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthRegisterInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 3, max = 50, message = "Between 3 and 50 characters"))]
    pub username: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub is_photographer: bool,
}

/// `username` carries the email address of the account.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthLoginInput {
    #[serde(alias = "email", deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Min 1 character"))]
    pub username: String,
    #[validate(length(min = 1, message = "Min 1 character"))]
    pub password: String,
}

pub struct AuthService<'a> {
    ctx: &'a Ctx,
    jwt: &'a JWT,
    user_repository: LocalUserDbService<'a>,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx, jwt: &'a JWT) -> AuthService<'a> {
        AuthService {
            ctx,
            jwt,
            user_repository: LocalUserDbService { db, ctx },
        }
    }

    pub async fn register(&self, input: AuthRegisterInput) -> CtxResult<LocalUser> {
        self.register_user(input, false).await
    }

    pub async fn register_admin(&self, input: AuthRegisterInput) -> CtxResult<LocalUser> {
        self.register_user(input, true).await
    }

    async fn register_user(&self, input: AuthRegisterInput, is_admin: bool) -> CtxResult<LocalUser> {
        input.validate().map_err(CtxError::from(self.ctx))?;

        if self
            .user_repository
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: "Email already registered".to_string(),
            }));
        }

        if self
            .user_repository
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: "Username already taken".to_string(),
            }));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|description| self.ctx.to_ctx_error(AppError::Generic { description }))?;

        let user = self
            .user_repository
            .create(CreateLocalUser {
                username: input.username,
                email: input.email.to_lowercase(),
                password_hash,
                is_photographer: input.is_photographer,
                is_admin,
            })
            .await?;

        info!("->> registered user {}", user.username);
        Ok(user)
    }

    /// Returns the access token and the logged in user.
    pub async fn login_password(&self, input: AuthLoginInput) -> CtxResult<(String, LocalUser)> {
        input.validate().map_err(CtxError::from(self.ctx))?;

        let user = self
            .user_repository
            .find_by_email(&input.username)
            .await?
            .ok_or_else(|| self.ctx.to_ctx_error(AppError::AuthenticationFail))?;

        if !verify_password(&user.password_hash, &input.password) {
            return Err(self.ctx.to_ctx_error(AppError::AuthenticationFail));
        }

        let token = self
            .jwt
            .create_by_login(&thing_key(&user.id))
            .map_err(|description| self.ctx.to_ctx_error(AppError::Generic { description }))?;

        Ok((token, user))
    }
}
