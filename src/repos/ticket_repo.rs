/*
 * Responsibility
 * - Ticket model and the `Lister` capability the list handler depends on
 * - In-memory, insertion-ordered store (optionally seeded from a JSON file)
 */
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::repos::error::RepoError;

/// A ticket, which can be assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Source of the ticket list served on `GET /`.
///
/// Implementations must return tickets in their own stable order; callers do not re-sort.
#[async_trait]
pub trait Lister: Send + Sync {
    async fn list(&self) -> Result<Vec<Ticket>, RepoError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTicketRepo {
    tickets: Vec<Ticket>,
}

impl MemoryTicketRepo {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    /// Load a JSON array of tickets. Order in the file is the listing order.
    pub fn from_json_file(path: &Path) -> Result<Self, RepoError> {
        let raw = std::fs::read(path)?;
        let tickets: Vec<Ticket> = serde_json::from_slice(&raw)?;

        Ok(Self::new(tickets))
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[async_trait]
impl Lister for MemoryTicketRepo {
    async fn list(&self) -> Result<Vec<Ticket>, RepoError> {
        Ok(self.tickets.clone())
    }
}
