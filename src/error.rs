/*
 * Responsibility
 * - ApiError shared by middleware and handlers
 * - IntoResponse (HTTP status / `{"msg": ...}` JSON body)
 * - Conversions from verifier / repo errors (internal detail never reaches the body)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::response::JsonUtf8;
use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub msg: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Request Timeout")]
    RequestTimeout,
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            msg: self.to_string(),
        };

        (status, JsonUtf8(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            // A valid envelope with a broken payload is still an authentication failure.
            AuthError::Unauthenticated(msg) | AuthError::BadInput(msg) => {
                ApiError::Unauthenticated(msg)
            }
            AuthError::Configuration(_) => ApiError::Internal,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(_: RepoError) -> Self {
        ApiError::Internal
    }
}
