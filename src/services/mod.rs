/*
 * Responsibility
 * - Services with no HTTP knowledge (token verification)
 */
pub mod auth;
