use crate::error::ApiError;

/// Every path without a route. Not behind the access middleware.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known path, unsupported method. Not behind the access middleware either.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
