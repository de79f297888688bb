pub mod error;
pub mod ticket_repo;

pub use ticket_repo::{Lister, MemoryTicketRepo, Ticket};
