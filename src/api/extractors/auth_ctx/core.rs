use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor handing the verified `AuthCtx` to a handler.
///
/// Relies on the access middleware having inserted `AuthCtx` into the request
/// extensions. Without it (route not behind the middleware) the request is
/// rejected with 401, so a handler never runs unauthenticated.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or_else(|| ApiError::Unauthenticated("request is not authenticated".to_string()))
    }
}
