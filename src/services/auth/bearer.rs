//! `Authorization: Bearer <token>` parsing.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("authorization header is missing")]
    Missing,
    #[error("authorization header must be 'Bearer <token>'")]
    Shape,
    #[error("authorization header must start with 'Bearer'")]
    Scheme,
    #[error("bearer token is empty")]
    EmptyToken,
}

/// Pulls the token out of an Authorization header value.
///
/// The value must be exactly two space-separated parts, the first being `Bearer`
/// (case-insensitive).
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, BearerError> {
    let value = authorization.ok_or(BearerError::Missing)?;

    let parts: Vec<&str> = value.split(' ').collect();
    let &[scheme, token] = parts.as_slice() else {
        return Err(BearerError::Shape);
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::Scheme);
    }
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token)
}
