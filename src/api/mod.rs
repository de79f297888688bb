/*
 * Responsibility
 * - HTTP surface: routes, handlers, DTOs, extractors and JSON responses
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod response;
mod routes;

pub use routes::routes;
