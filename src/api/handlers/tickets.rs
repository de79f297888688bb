/*
 * Responsibility
 * - GET / : list tickets for an authenticated caller
 * - Lister failures are logged here and answered with an opaque 500
 */
use axum::extract::State;

use crate::{
    api::{dto::tickets::TicketResponse, extractors::AuthCtxExtractor, response::JsonUtf8},
    error::ApiError,
    state::AppState,
};

pub async fn list_tickets(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
) -> Result<JsonUtf8<Vec<TicketResponse>>, ApiError> {
    let tickets = state.lister.list().await.map_err(|err| {
        tracing::error!(error = %err, subject_id = %ctx.subject_id, "listing tickets failed");
        ApiError::from(err)
    })?;

    tracing::debug!(
        subject_id = %ctx.subject_id,
        count = tickets.len(),
        "listed tickets"
    );

    // Lister order is the response order.
    Ok(JsonUtf8(
        tickets.into_iter().map(TicketResponse::from).collect(),
    ))
}
