use thiserror::Error;

use crate::services::auth::claims::VerifiedClaims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// The token has no `permissions` claim; points at provider/API misconfiguration
    /// (RBAC permissions not added to the access token).
    #[error("permissions not included in token")]
    MissingPermissionsClaim,
    #[error("permission '{0}' not granted")]
    Forbidden(String),
}

/// Exact string match against the `permissions` claim. No wildcards, no hierarchy.
pub fn check_permission(claims: &VerifiedClaims, required: &str) -> Result<(), PermissionError> {
    let granted = claims
        .permissions()
        .ok_or(PermissionError::MissingPermissionsClaim)?;

    if granted.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(PermissionError::Forbidden(required.to_string()))
    }
}
