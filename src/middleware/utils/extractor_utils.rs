use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::middleware::error::ErrorResponseBody;

fn bad_request(detail: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseBody::new(detail, None)),
    )
        .into_response()
}

/// JSON or url-encoded form body, validated before the handler runs.
#[derive(Debug)]
pub struct JsonOrFormValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrFormValidated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|v| v.to_string());

        let payload: T = match content_type {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(payload) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|err| bad_request(err.body_text()))?;
                payload
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(payload) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|err| bad_request(err.body_text()))?;
                payload
            }
            _ => return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response()),
        };

        payload
            .validate()
            .map_err(|err| bad_request(err.to_string()))?;
        Ok(Self(payload))
    }
}

/// Query string, validated before the handler runs.
#[derive(Debug)]
pub struct QueryValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryValidated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(payload) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|err| bad_request(err.body_text()))?;
        payload
            .validate()
            .map_err(|err| bad_request(err.to_string()))?;
        Ok(Self(payload))
    }
}
