/*
 * Responsibility
 * - URL table: GET / (authenticated ticket list), other methods on / 405, everything else 404
 * - Built once at startup; the 404/405 fallbacks sit outside the access middleware
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    fallback::{method_not_allowed, not_found},
    tickets::list_tickets,
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/", get(list_tickets).fallback(method_not_allowed));

    access::apply(protected, state).fallback(not_found)
}
