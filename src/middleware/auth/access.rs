//! Authorization gate: bearer token → JWKS-verified claims → required permission → handler.
//!
//! Each protected method route gets its own gate carrying the permission it requires.
//! On success the verified claims go into request extensions as `AuthCtx`; on failure the
//! request ends here with a structured 401/403/503.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

#[derive(Clone)]
struct PermissionGate {
    auth: Arc<AuthService>,
    permission: &'static str,
}

/// Wraps `route` so every method on it requires `permission`.
///
/// ```ignore
/// .route("/movies", access::require(get(list_movies), &state, "get:movies"))
/// ```
pub fn require(
    route: MethodRouter<AppState>,
    state: &AppState,
    permission: &'static str,
) -> MethodRouter<AppState> {
    let gate = PermissionGate {
        auth: state.auth.clone(),
        permission,
    };

    // route_layer: unmatched methods still fall through to 405 without touching auth
    route.route_layer(middleware::from_fn_with_state(gate, access_middleware))
}

async fn access_middleware(
    State(gate): State<PermissionGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // A header that is not visible ASCII is malformed, not absent.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    let claims = match gate.auth.authorize(authorization, gate.permission).await {
        Ok(claims) => claims,
        Err(err @ AuthError::KeyStoreUnavailable(_)) => {
            tracing::error!(
                error = ?err,
                permission = gate.permission,
                "signing keys unavailable, rejecting request"
            );
            return Err(err.into());
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                permission = gate.permission,
                "authorization failed"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(
        sub = %claims.subject(),
        iss = %claims.issuer(),
        aud = ?claims.audience(),
        permission = gate.permission,
        issued_at = ?claims.issued_at(),
        expires_at = claims.expires_at(),
        "authorized"
    );

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::new(claims));

    Ok(next.run(req).await)
}
