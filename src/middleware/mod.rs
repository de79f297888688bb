/*
 * Responsibility
 * - Public surface of the middleware layers
 */
pub mod auth;
pub mod http;
