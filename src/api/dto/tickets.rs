/*
 * Responsibility
 * - Ticket response DTO (field names and timestamp format are part of the API)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::repos::Ticket;

/// `created_at` / `due_date` serialize as RFC 3339; a missing due date is `null`.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<Ticket> for TicketResponse {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            title: t.title,
            author: t.author,
            created_at: t.created_at,
            due_date: t.due_date,
        }
    }
}
