use thiserror::Error;

use crate::services::auth::access_jwt::{AccessJwtError, TokenVerifier};
use crate::services::auth::bearer::{BearerError, extract_bearer};
use crate::services::auth::claims::VerifiedClaims;
use crate::services::auth::key_store::KeyStoreError;
use crate::services::auth::permissions::{PermissionError, check_permission};

/// Why a request was rejected by the gate. One variant per failure kind.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed authorization header: {0}")]
    MalformedHeader(#[from] BearerError),
    #[error("invalid token: {0}")]
    InvalidToken(AccessJwtError),
    #[error("malformed claims: {0}")]
    MalformedClaims(PermissionError),
    #[error("forbidden: {0}")]
    Forbidden(PermissionError),
    #[error("identity provider unavailable")]
    KeyStoreUnavailable(#[source] KeyStoreError),
}

impl From<AccessJwtError> for AuthError {
    fn from(err: AccessJwtError) -> Self {
        match err {
            AccessJwtError::KeyStoreUnavailable(source) => Self::KeyStoreUnavailable(source),
            other => Self::InvalidToken(other),
        }
    }
}

impl From<PermissionError> for AuthError {
    fn from(err: PermissionError) -> Self {
        match err {
            PermissionError::MissingPermissionsClaim => Self::MalformedClaims(err),
            PermissionError::Forbidden(_) => Self::Forbidden(err),
        }
    }
}

/// Authorization Gate: extract → verify → check permission.
///
/// Shared by every protected route through `AppState`.
#[derive(Debug, Clone)]
pub struct AuthService {
    verifier: TokenVerifier,
}

impl AuthService {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Runs the full pipeline for one request. Nothing is retried; the first failing stage
    /// decides the error.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required_permission: &str,
    ) -> Result<VerifiedClaims, AuthError> {
        let token = extract_bearer(authorization)?;
        let claims = self.verifier.verify(token).await?;
        check_permission(&claims, required_permission)?;
        Ok(claims)
    }
}
