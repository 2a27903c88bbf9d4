//! Identity provider signing keys (JWKS), fetched over HTTPS and cached for the process lifetime.
use std::{sync::Arc, time::Duration};

use jsonwebtoken::jwk::{Jwk, JwkSet};
use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("no signing key with kid '{0}'")]
    NotFound(String),
    #[error("jwks endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("jwks endpoint returned status {0}")]
    UnexpectedStatus(u16),
    #[error("jwks response is not a key set: {0}")]
    InvalidKeySet(#[source] reqwest::Error),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl KeyStoreError {
    /// Infrastructure trouble, as opposed to a key that simply does not exist.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

/// Key Store Client.
///
/// The cached set is swapped wholesale after each successful fetch. The lock is never held
/// across the network call, so concurrent first-access may fetch twice; both writes store an
/// equivalent set.
#[derive(Debug)]
pub struct KeyStore {
    http: Client,
    jwks_url: Url,
    cache: RwLock<Option<Arc<JwkSet>>>,
}

impl KeyStore {
    pub fn new(jwks_url: Url, fetch_timeout: Duration) -> Result<Self, KeyStoreError> {
        let http = Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(KeyStoreError::Client)?;

        Ok(Self {
            http,
            jwks_url,
            cache: RwLock::new(None),
        })
    }

    /// Returns the key whose `kid` matches.
    ///
    /// A miss (empty cache or unknown kid) triggers exactly one refetch before `NotFound`.
    pub async fn get_signing_key(&self, kid: &str) -> Result<Jwk, KeyStoreError> {
        let cached = self.cache.read().await.clone();
        if let Some(set) = cached
            && let Some(jwk) = set.find(kid)
        {
            return Ok(jwk.clone());
        }

        tracing::debug!(kid = %kid, "signing key not cached, refetching key set");
        let fresh = self.refresh().await?;

        fresh
            .find(kid)
            .cloned()
            .ok_or_else(|| KeyStoreError::NotFound(kid.to_string()))
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>, KeyStoreError> {
        let fetched = Arc::new(self.fetch().await?);
        *self.cache.write().await = Some(fetched.clone());

        tracing::info!(
            url = %self.jwks_url,
            keys = fetched.keys.len(),
            "signing key set refreshed"
        );
        Ok(fetched)
    }

    async fn fetch(&self) -> Result<JwkSet, KeyStoreError> {
        let response = self
            .http
            .get(self.jwks_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(KeyStoreError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeyStoreError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(KeyStoreError::InvalidKeySet)
    }
}
