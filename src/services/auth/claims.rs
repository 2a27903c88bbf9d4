/// Claims of an access token that passed the full verification pipeline.
///
/// Only `TokenVerifier` produces this type, so holding one means signature, algorithm,
/// expiry, audience and issuer have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    subject: String,
    audience: Vec<String>,
    issuer: String,
    expires_at: i64,
    issued_at: Option<i64>,
    permissions: Option<Vec<String>>,
}

impl VerifiedClaims {
    pub(in crate::services::auth) fn new(
        subject: String,
        audience: Vec<String>,
        issuer: String,
        expires_at: i64,
        issued_at: Option<i64>,
        permissions: Option<Vec<String>>,
    ) -> Self {
        Self {
            subject,
            audience,
            issuer,
            expires_at,
            issued_at,
            permissions,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn audience(&self) -> &[String] {
        &self.audience
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// `exp`, unix seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// `iat`, unix seconds.
    pub fn issued_at(&self) -> Option<i64> {
        self.issued_at
    }

    /// `None` when the token carried no `permissions` claim at all.
    pub fn permissions(&self) -> Option<&[String]> {
        self.permissions.as_deref()
    }
}
