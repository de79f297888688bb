/*
 * Responsibility
 * - What a ticket store reports upward when it fails
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("ticket store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ticket store decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
