//! HTTP-level middleware applied to every route, gated or not.
//!
//! - `x-request-id`: generated when the client sends none, echoed on the response
//!   and recorded on the request span, so a rejected token can be matched to its
//!   `warn` line
//! - request timeout from `Config`, answered as `408 {"msg":"Request Timeout"}`
//!
//! No body limit: the API only serves `GET /` and never reads a request body.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::ApiError;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Knobs for the HTTP layers, taken from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct HttpPolicy {
    pub request_timeout: Duration,
}

impl Default for HttpPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl HttpPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }
}

pub fn apply(router: Router, policy: &HttpPolicy) -> Router {
    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                tracing::warn!("request timed out");
                ApiError::RequestTimeout
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                ApiError::Internal
            }
        }))
        .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(TimeoutLayer::new(policy.request_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(request_span));

    router.layer(layers)
}

fn request_span(req: &Request<Body>) -> tracing::Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::to_bytes,
        http::{StatusCode, header},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "too late"
    }

    #[tokio::test]
    async fn slow_request_times_out_with_json_408() {
        let policy = HttpPolicy {
            request_timeout: Duration::from_millis(20),
        };
        let app = apply(Router::new().route("/slow", get(slow)), &policy);

        let res = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json; charset=UTF-8")
        );
        let body = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&body[..], br#"{"msg":"Request Timeout"}"#);
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let app = apply(
            Router::new().route("/", get(|| async { "ok" })),
            &HttpPolicy::default(),
        );

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::OK);
        let generated = res
            .headers()
            .get(REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .expect("request id");
        assert!(!generated.is_empty());
    }

    #[test]
    fn policy_follows_config() {
        let config = Config::from_lookup(|key| match key {
            "JWT_PUBLIC_KEY_PATH" => Some("k.pem".to_string()),
            "REQUEST_TIMEOUT_SECONDS" => Some("7".to_string()),
            _ => None,
        })
        .expect("config");

        assert_eq!(
            HttpPolicy::from_config(&config).request_timeout,
            Duration::from_secs(7)
        );
    }
}
