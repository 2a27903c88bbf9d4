/*
 * Responsibility
 * - Public surface of the middleware layer
 * - auth: per-route authorization gate, cors/http: router-wide layers
 */
pub mod auth;
pub mod cors;
pub mod http;
