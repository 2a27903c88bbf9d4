/// Factory: build `AuthService` from application `Config`.
use std::{sync::Arc, time::Duration};

use crate::config::Config;
use crate::services::auth::{AuthService, KeyStore, KeyStoreError, TokenVerifier, VerifierConfig};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, KeyStoreError> {
    let key_store = KeyStore::new(
        config.auth_jwks_url.clone(),
        Duration::from_secs(config.jwks_fetch_timeout_seconds),
    )?;

    let verifier = TokenVerifier::new(
        Arc::new(key_store),
        VerifierConfig {
            audience: config.auth_audience.clone(),
            issuer: config.auth_issuer.clone(),
            algorithms: config.auth_algorithms.clone(),
            leeway_seconds: config.access_token_leeway_seconds,
        },
    );

    Ok(Arc::new(AuthService::new(verifier)))
}
