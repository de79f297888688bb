//! Bearer token gate: `Authentication` header → token verification → `AuthCtx` in extensions.
//!
//! Per request the gate walks `header present → "Bearer " prefix → token verified → dispatch`
//! and stops at the first failed step:
//! - header missing or empty: 400
//! - header without the `Bearer ` prefix: 400
//! - token rejected by the verifier (signature, expiry, algorithm, claims): 401
//!
//! The header is `Authentication`, not `Authorization`. Existing clients send it under
//! that name.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, Request, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::extractors::AuthCtx;
use crate::api::response::json_content_type;
use crate::error::ApiError;
use crate::state::AppState;

pub const AUTHENTICATION: HeaderName = HeaderName::from_static("authentication");

const BEARER_PREFIX: &str = "Bearer ";

const MISSING_HEADER_MSG: &str = r#"Missing "Authentication" header of format "Bearer [JWT]""#;
const MALFORMED_HEADER_MSG: &str =
    r#"Wrongly formatted "Authentication" header. It must be of the format "Bearer [JWT]""#;

/// Put every route already registered on `router` behind the gate.
///
/// Uses `route_layer`, so the router's fallback (404) is reached without
/// authentication. Call it after the protected routes are added.
///
/// ```ignore
/// let protected = Router::new().route("/", get(list_tickets));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state, access_middleware))
        // Outermost: the JSON content type holds for rejections and for whatever the handler wrote.
        .route_layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            json_content_type(),
        ))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = %err, "rejected authentication header");
            return Err(err);
        }
    };

    let subject_id = match state.auth.verify(token) {
        Ok(subject_id) => subject_id,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(err.into());
        }
    };

    tracing::debug!(subject_id = %subject_id, "request authenticated");

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::new(subject_id));

    Ok(next.run(req).await)
}

/// Return the token part of `Authentication: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let Some(value) = headers.get(AUTHENTICATION).filter(|v| !v.is_empty()) else {
        return Err(ApiError::bad_request(MISSING_HEADER_MSG));
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| ApiError::bad_request(MALFORMED_HEADER_MSG))
}
