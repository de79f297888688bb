/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cloned per request, so everything inside is behind an Arc and never mutated
 */
use std::sync::Arc;

use crate::repos::Lister;
use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenVerifier>,
    pub lister: Arc<dyn Lister>,
}

impl AppState {
    pub fn new(auth: Arc<TokenVerifier>, lister: Arc<dyn Lister>) -> Self {
        Self { auth, lister }
    }
}
