pub mod fallback;
pub mod tickets;
