/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - store: movie/actor persistence, auth: the authorization gate (owns the JWKS cache)
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::repos::CastStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CastStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn CastStore>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }
}
