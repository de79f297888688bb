/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The access middleware verifies the token and stores this in request extensions
 */

/// Context attached to every request that passed the access middleware.
///
/// `subject_id` is the `id` claim of the verified token, kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub subject_id: String,
}

impl AuthCtx {
    pub fn new(subject_id: String) -> Self {
        Self { subject_id }
    }
}
