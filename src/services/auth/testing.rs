//! Fixtures shared by the auth and API tests: a deterministic Ed25519 key, a mock JWKS
//! endpoint and token minting.
use std::{sync::Arc, time::Duration};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ed25519_dalek::{SigningKey, pkcs8::EncodePrivateKey};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::services::auth::{AuthService, KeyStore, TokenVerifier, VerifierConfig};

pub const KID: &str = "test-key";
pub const ISSUER: &str = "https://cast.example.auth0.com/";
pub const AUDIENCE: &str = "casting-api";
pub const SUBJECT: &str = "auth0|5f1e2d3c4b5a69788796a5b4";
pub const JWKS_PATH: &str = "/.well-known/jwks.json";

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

pub fn other_signing_key() -> SigningKey {
    SigningKey::from_bytes(&[42u8; 32])
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn jwk(kid: &str, key: &SigningKey) -> Value {
    json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "alg": "EdDSA",
        "use": "sig",
        "kid": kid,
        "x": URL_SAFE_NO_PAD.encode(key.verifying_key().as_bytes()),
    })
}

/// Key set publishing `signing_key()` under each of `kids`.
pub fn jwks(kids: &[&str]) -> Value {
    let keys: Vec<Value> = kids.iter().map(|kid| jwk(kid, &signing_key())).collect();
    json!({ "keys": keys })
}

/// A payload that passes every claim check, granting `permissions`.
pub fn claims(permissions: &[&str]) -> Value {
    let now = now();
    json!({
        "iss": ISSUER,
        "sub": SUBJECT,
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + 3600,
        "permissions": permissions,
    })
}

pub fn claims_without_permissions() -> Value {
    let mut payload = claims(&[]);
    if let Some(map) = payload.as_object_mut() {
        map.remove("permissions");
    }
    payload
}

pub fn encoding_key(key: &SigningKey) -> EncodingKey {
    let der = key.to_pkcs8_der().expect("pkcs8 encoding");
    EncodingKey::from_ed_der(der.as_bytes())
}

pub fn sign_with(payload: &Value, kid: &str, key: &SigningKey) -> String {
    let mut header = Header::new(Algorithm::EdDSA);
    header.kid = Some(kid.to_string());
    jsonwebtoken::encode(&header, payload, &encoding_key(key)).expect("token signing")
}

pub fn sign(payload: &Value) -> String {
    sign_with(payload, KID, &signing_key())
}

pub async fn jwks_server(kids: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks(kids)))
        .mount(&server)
        .await;
    server
}

/// Like `jwks_server`, but fails on drop unless fetched exactly `calls` times.
pub async fn jwks_server_expecting(kids: &[&str], calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks(kids)))
        .expect(calls)
        .mount(&server)
        .await;
    server
}

pub async fn failing_jwks_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    server
}

pub fn key_store(server: &MockServer) -> Arc<KeyStore> {
    let url = Url::parse(&format!("{}{}", server.uri(), JWKS_PATH)).expect("jwks url");
    Arc::new(KeyStore::new(url, Duration::from_secs(2)).expect("key store"))
}

pub fn verifier(server: &MockServer, algorithms: Vec<Algorithm>) -> TokenVerifier {
    TokenVerifier::new(
        key_store(server),
        VerifierConfig {
            audience: AUDIENCE.to_string(),
            issuer: ISSUER.to_string(),
            algorithms,
            leeway_seconds: 60,
        },
    )
}

pub fn auth_service(server: &MockServer) -> AuthService {
    AuthService::new(verifier(server, vec![Algorithm::EdDSA]))
}
