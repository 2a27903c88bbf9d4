use std::{collections::HashSet, sync::Arc};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use thiserror::Error;

use crate::services::auth::claims::VerifiedClaims;
use crate::services::auth::key_store::{KeyStore, KeyStoreError};

// Errors returned by access-token verification. Display strings name the failed check.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("malformed token")]
    Malformed,
    #[error("algorithm not allowed: {0:?}")]
    DisallowedAlgorithm(Algorithm),
    #[error("missing key id")]
    MissingKid,
    #[error("key not found")]
    KeyNotFound,
    #[error("bad signature")]
    BadSignature,
    #[error("expired")]
    Expired,
    #[error("audience mismatch")]
    AudienceMismatch,
    #[error("issuer mismatch")]
    IssuerMismatch,
    #[error("missing claim: {0}")]
    MissingClaim(&'static str),
    #[error("signing keys unavailable")]
    KeyStoreUnavailable(#[source] KeyStoreError),
}

/// HMAC algorithms share the secret with the issuer; they are never trusted here.
pub fn is_asymmetric(alg: Algorithm) -> bool {
    !matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

fn audience_list(aud: &serde_json::Value) -> Vec<String> {
    match aud {
        // Typical: aud is a string
        serde_json::Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        // Auth0 sends an array when the userinfo audience is included
        serde_json::Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect(),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => Vec::new(),
    }
}

/// Access token payload as sent. Untrusted until the signature check passes.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: Option<String>,
    // Keep as Value to accept both string and array.
    #[serde(default)]
    pub aud: serde_json::Value,
    pub sub: Option<String>,
    pub exp: Option<i64>,
    pub iat: Option<i64>,
    pub permissions: Option<Vec<String>>,
}

/// What the verifier trusts. Built once at startup.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub audience: String,
    pub issuer: String,
    pub algorithms: Vec<Algorithm>,
    pub leeway_seconds: u64,
}

/// Token Verifier: header → key lookup → signature → exp/aud/iss.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key_store: Arc<KeyStore>,
    config: Arc<VerifierConfig>,
}

impl TokenVerifier {
    pub fn new(key_store: Arc<KeyStore>, config: VerifierConfig) -> Self {
        Self {
            key_store,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub async fn verify(&self, token: &str) -> Result<VerifiedClaims, AccessJwtError> {
        self.verify_at(token, chrono::Utc::now().timestamp()).await
    }

    async fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedClaims, AccessJwtError> {
        // Header first, unverified: only alg and kid are read from it.
        let header = jsonwebtoken::decode_header(token).map_err(|_| AccessJwtError::Malformed)?;

        let alg = header.alg;
        if !is_asymmetric(alg) || !self.config.algorithms.contains(&alg) {
            return Err(AccessJwtError::DisallowedAlgorithm(alg));
        }

        let kid = header
            .kid
            .filter(|kid| !kid.is_empty())
            .ok_or(AccessJwtError::MissingKid)?;

        let jwk = self
            .key_store
            .get_signing_key(&kid)
            .await
            .map_err(|err| {
                if err.is_unavailable() {
                    AccessJwtError::KeyStoreUnavailable(err)
                } else {
                    AccessJwtError::KeyNotFound
                }
            })?;

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(|err| {
            tracing::warn!(kid = %kid, error = %err, "signing key cannot be used for verification");
            AccessJwtError::BadSignature
        })?;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &decoding_key,
            &signature_only(alg),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                AccessJwtError::BadSignature
            }
            _ => AccessJwtError::Malformed,
        })?;

        self.validate_claims(data.claims, now)
    }

    /// Claim checks, in order: exp, aud, iss. The first failure wins.
    fn validate_claims(
        &self,
        claims: AccessTokenClaims,
        now: i64,
    ) -> Result<VerifiedClaims, AccessJwtError> {
        let exp = claims.exp.ok_or(AccessJwtError::MissingClaim("exp"))?;
        let leeway = i64::try_from(self.config.leeway_seconds).unwrap_or(i64::MAX);
        if exp.saturating_add(leeway) <= now {
            return Err(AccessJwtError::Expired);
        }

        let audience = audience_list(&claims.aud);
        if !audience.iter().any(|aud| *aud == self.config.audience) {
            return Err(AccessJwtError::AudienceMismatch);
        }

        let issuer = match claims.iss {
            Some(iss) if iss == self.config.issuer => iss,
            _ => return Err(AccessJwtError::IssuerMismatch),
        };

        let subject = claims
            .sub
            .filter(|sub| !sub.trim().is_empty())
            .ok_or(AccessJwtError::MissingClaim("sub"))?;

        Ok(VerifiedClaims::new(
            subject,
            audience,
            issuer,
            exp,
            claims.iat,
            claims.permissions,
        ))
    }
}

// Signature + algorithm only; registered claims are checked by `validate_claims` so each
// failure can be named.
fn signature_only(alg: Algorithm) -> Validation {
    let mut validation = Validation::new(alg);
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;
    use wiremock::MockServer;

    use super::*;
    use crate::services::auth::testing::{
        self, AUDIENCE, ISSUER, KID, now, other_signing_key, sign, sign_with, signing_key,
    };

    async fn verifier(server: &MockServer) -> TokenVerifier {
        testing::verifier(server, vec![Algorithm::EdDSA])
    }

    #[tokio::test]
    async fn valid_token_yields_claims() {
        let server = testing::jwks_server(&[KID]).await;
        let token = sign(&testing::claims(&["get:movies", "get:actors"]));

        let claims = verifier(&server).await.verify(&token).await.unwrap();

        assert_eq!(claims.subject(), testing::SUBJECT);
        assert_eq!(claims.issuer(), ISSUER);
        assert_eq!(claims.audience(), &[AUDIENCE.to_string()]);
        assert!(claims.issued_at().is_some());
        assert_eq!(
            claims.permissions(),
            Some(&["get:movies".to_string(), "get:actors".to_string()][..])
        );
    }

    #[tokio::test]
    async fn audience_array_containing_expected_is_accepted() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&[]);
        payload["aud"] = json!(["https://cast.example.auth0.com/userinfo", AUDIENCE]);

        let claims = verifier(&server).await.verify(&sign(&payload)).await.unwrap();
        assert_eq!(claims.audience().len(), 2);
    }

    #[tokio::test]
    async fn unknown_kid_is_key_not_found() {
        let server = testing::jwks_server(&[KID]).await;
        let token = sign_with(&testing::claims(&[]), "not-published", &other_signing_key());

        let err = verifier(&server).await.verify(&token).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::KeyNotFound));
        assert_eq!(err.to_string(), "key not found");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&["get:movies"]);
        payload["exp"] = json!(now() - 3600);

        let err = verifier(&server).await.verify(&sign(&payload)).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::Expired));
        assert_eq!(err.to_string(), "expired");
    }

    #[tokio::test]
    async fn expiry_honours_leeway() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&[]);
        let exp = now() - 30;
        payload["exp"] = json!(exp);
        let token = sign(&payload);
        let verifier = verifier(&server).await;

        // leeway is 60s in the test config
        assert!(verifier.verify_at(&token, exp + 59).await.is_ok());
        assert!(matches!(
            verifier.verify_at(&token, exp + 60).await,
            Err(AccessJwtError::Expired)
        ));
    }

    #[tokio::test]
    async fn expiry_is_checked_before_audience() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&[]);
        payload["exp"] = json!(now() - 3600);
        payload["aud"] = json!("someone-else");

        let err = verifier(&server).await.verify(&sign(&payload)).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::Expired));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&["get:movies"]);
        payload["aud"] = json!("https://another.api");

        let err = verifier(&server).await.verify(&sign(&payload)).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::AudienceMismatch));
        assert_eq!(err.to_string(), "audience mismatch");
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&["get:movies"]);
        payload["iss"] = json!("https://evil.example.com/");

        let err = verifier(&server).await.verify(&sign(&payload)).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::IssuerMismatch));
    }

    #[tokio::test]
    async fn missing_subject_is_rejected() {
        let server = testing::jwks_server(&[KID]).await;
        let mut payload = testing::claims(&[]);
        payload.as_object_mut().unwrap().remove("sub");

        let err = verifier(&server).await.verify(&sign(&payload)).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::MissingClaim("sub")));
    }

    #[tokio::test]
    async fn foreign_key_under_known_kid_is_bad_signature() {
        let server = testing::jwks_server(&[KID]).await;
        let token = sign_with(&testing::claims(&[]), KID, &other_signing_key());

        let err = verifier(&server).await.verify(&token).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::BadSignature));
    }

    #[tokio::test]
    async fn tampered_payload_is_bad_signature() {
        let server = testing::jwks_server(&[KID]).await;
        let token = sign(&testing::claims(&["get:movies"]));

        let mut forged = testing::claims(&["get:movies", "delete:movies"]);
        forged["sub"] = json!(testing::SUBJECT);
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let segments: Vec<&str> = token.split('.').collect();
        let tampered = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

        let err = verifier(&server).await.verify(&tampered).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::BadSignature));
    }

    #[tokio::test]
    async fn symmetric_token_is_rejected_before_key_lookup() {
        let server = testing::jwks_server_expecting(&[KID], 0).await;

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(KID.to_string());
        let token = jsonwebtoken::encode(
            &header,
            &testing::claims(&["get:movies"]),
            &EncodingKey::from_secret(b"guessable"),
        )
        .unwrap();

        let err = verifier(&server).await.verify(&token).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::DisallowedAlgorithm(Algorithm::HS256)));
    }

    #[tokio::test]
    async fn alg_none_is_rejected() {
        let server = testing::jwks_server_expecting(&[KID], 0).await;

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT","kid":"test-key"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&testing::claims(&["get:movies"])).unwrap());
        let token = format!("{header}.{payload}.");

        let err = verifier(&server).await.verify(&token).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::Malformed));
    }

    #[tokio::test]
    async fn algorithm_outside_allow_list_is_rejected() {
        let server = testing::jwks_server_expecting(&[KID], 0).await;
        let verifier = testing::verifier(&server, vec![Algorithm::RS256]);

        let err = verifier
            .verify(&sign(&testing::claims(&[])))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessJwtError::DisallowedAlgorithm(Algorithm::EdDSA)));
    }

    #[tokio::test]
    async fn missing_kid_is_rejected() {
        let server = testing::jwks_server_expecting(&[KID], 0).await;
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::EdDSA),
            &testing::claims(&[]),
            &testing::encoding_key(&signing_key()),
        )
        .unwrap();

        let err = verifier(&server).await.verify(&token).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::MissingKid));
    }

    #[tokio::test]
    async fn garbage_is_malformed() {
        let server = testing::jwks_server_expecting(&[KID], 0).await;

        let err = verifier(&server).await.verify("xyz").await.unwrap_err();
        assert!(matches!(err, AccessJwtError::Malformed));
    }

    #[tokio::test]
    async fn key_store_outage_is_reported_separately() {
        let server = testing::failing_jwks_server().await;
        let token = sign(&testing::claims(&["get:movies"]));

        let err = verifier(&server).await.verify(&token).await.unwrap_err();
        assert!(matches!(err, AccessJwtError::KeyStoreUnavailable(_)));
    }
}
