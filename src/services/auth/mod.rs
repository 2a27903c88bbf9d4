pub mod access_jwt;
pub mod bearer;
pub mod claims;
pub mod factory;
pub mod gate;
pub mod key_store;
pub mod permissions;

#[cfg(test)]
pub mod testing;

pub use access_jwt::{TokenVerifier, VerifierConfig};
pub use claims::VerifiedClaims;
pub use factory::build_auth_service;
pub use gate::{AuthError, AuthService};
pub use key_store::{KeyStore, KeyStoreError};
