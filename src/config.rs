/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, CORS allowlist, Auth0 domain/audience ...)
 * - Validate them up front (startup fails on anything missing or invalid)
 * - Derive issuer / JWKS URL from the identity provider domain
 */
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub request_timeout_seconds: u64,
    pub cors_allowed_origins: Vec<String>,

    pub database_url: String,
    pub database_max_connections: u32,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks_url: Url,
    pub auth_algorithms: Vec<Algorithm>,
    pub access_token_leeway_seconds: u64,
    pub jwks_fetch_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let request_timeout_seconds = parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let database_url = required(&lookup, "DATABASE_URL")?;
        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;

        let auth_domain = required(&lookup, "AUTH0_DOMAIN")?
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .to_string();
        if auth_domain.is_empty() {
            return Err(ConfigError::Invalid("AUTH0_DOMAIN"));
        }

        let auth_audience = required(&lookup, "AUTH_AUDIENCE")?;

        // Auth0 issues tokens with a trailing slash on `iss`.
        let auth_issuer =
            lookup("AUTH_ISSUER").unwrap_or_else(|| format!("https://{}/", auth_domain));

        let auth_jwks_url = lookup("AUTH_JWKS_URL")
            .unwrap_or_else(|| format!("https://{}/.well-known/jwks.json", auth_domain));
        let auth_jwks_url =
            Url::parse(&auth_jwks_url).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?;

        let auth_algorithms = parse_algorithms(lookup("AUTH_ALGORITHMS").as_deref())?;

        let access_token_leeway_seconds = parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;
        let jwks_fetch_timeout_seconds = parse_or(&lookup, "JWKS_FETCH_TIMEOUT_SECONDS", 5)?;
        if jwks_fetch_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("JWKS_FETCH_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            request_timeout_seconds,
            cors_allowed_origins,
            database_url,
            database_max_connections,
            auth_issuer,
            auth_audience,
            auth_jwks_url,
            auth_algorithms,
            access_token_leeway_seconds,
            jwks_fetch_timeout_seconds,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Parses the comma-separated allow-list. Only asymmetric algorithms are accepted.
fn parse_algorithms(raw: Option<&str>) -> Result<Vec<Algorithm>, ConfigError> {
    let raw = raw.unwrap_or("RS256");

    let mut algorithms = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let alg = Algorithm::from_str(name).map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS"))?;
        if !crate::services::auth::access_jwt::is_asymmetric(alg) {
            return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
        }
        if !algorithms.contains(&alg) {
            algorithms.push(alg);
        }
    }

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
    }
    Ok(algorithms)
}
