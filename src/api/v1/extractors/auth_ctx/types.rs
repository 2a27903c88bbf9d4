/*
 * Responsibility
 * - The "authorized request" context handlers see
 * - The gate middleware builds it from verified claims and stores it in request extensions;
 *   handlers only ever receive this type
 */

use crate::services::auth::VerifiedClaims;

/// Context attached to a request that passed the authorization gate.
///
/// Read-only: handlers get the verified claims, never the raw token.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    claims: VerifiedClaims,
}

impl AuthCtx {
    pub fn new(claims: VerifiedClaims) -> Self {
        Self { claims }
    }

    /// Granted permissions. Always present once the gate has passed.
    pub fn permissions(&self) -> &[String] {
        self.claims.permissions().unwrap_or_default()
    }

    pub fn subject(&self) -> &str {
        self.claims.subject()
    }
}
