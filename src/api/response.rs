//! JSON responses with an explicit UTF-8 charset.
//!
//! `axum::Json` answers `application/json`; clients of this API expect the
//! charset parameter on every response, so bodies go through `JsonUtf8` instead.
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

pub fn json_content_type() -> HeaderValue {
    HeaderValue::from_static(JSON_CONTENT_TYPE)
}

#[derive(Debug, Clone)]
pub struct JsonUtf8<T>(pub T);

impl<T: Serialize> IntoResponse for JsonUtf8<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, json_content_type())], body).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(header::CONTENT_TYPE, json_content_type())],
                    r#"{"msg":"Internal Server Error"}"#,
                )
                    .into_response()
            }
        }
    }
}
