use std::fmt;

use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::middleware::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    AuthenticationFail,
    AuthFailNoJwt,
    AuthFailJwtInvalid { source: String },
    AuthorizationFail { required: String },
    EntityFailIdNotFound { ident: String },
    NotFound { description: String },
    Serde { source: String },
    SurrealDb { source: String },
    FileStorage { source: String },
    TagSuggestion { source: String },
}

/// Carries the request id to report back to the client and implements IntoResponse.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Errors raised before a request id is attached.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

// for slightly less verbose error mappings
impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

const INTERNAL: &str = "Internal error";
const INVALID_CREDENTIALS: &str = "Could not validate credentials";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::AuthenticationFail => write!(f, "Incorrect username or password"),
            Self::AuthFailNoJwt => write!(f, "{INVALID_CREDENTIALS}"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "{INVALID_CREDENTIALS}"),
            Self::AuthorizationFail { required } => write!(f, "{required} privileges required"),
            Self::EntityFailIdNotFound { ident } => write!(f, "{ident} not found"),
            Self::NotFound { description } => write!(f, "{description}"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
            Self::FileStorage { .. } => write!(f, "{INTERNAL}"),
            Self::TagSuggestion { .. } => write!(f, "Tag suggestion failed"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Generic { .. } | AppError::Serde { .. } => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFail
            | AppError::AuthFailNoJwt
            | AppError::AuthFailJwtInvalid { .. } => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationFail { .. } => StatusCode::FORBIDDEN,
            AppError::EntityFailIdNotFound { .. } | AppError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            AppError::SurrealDb { .. }
            | AppError::FileStorage { .. }
            | AppError::TagSuggestion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    pub detail: String,
    pub req_id: String,
}

impl ErrorResponseBody {
    pub fn new(detail: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            detail,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

// REST error response
impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.error.status_code();
        if status_code.is_server_error() {
            error!("->> {:<12} - into_response - {self:?}", "ERROR");
        } else {
            warn!("->> {:<12} - into_response - {self:?}", "ERROR");
        }

        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, Json(body)).into_response();
        if status_code == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        // Insert the real Error into the response - for the logger
        response.extensions_mut().insert(self.error);
        response
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Generic {
            description: value.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::FileStorage {
            source: value.to_string(),
        }
    }
}
