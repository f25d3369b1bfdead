//! # veilbox-auth
//!
//! Credential *verification* for Veilbox. Token issuance, password
//! handling, and account management live in the identity service that
//! fronts this API; this crate only checks what callers present:
//! user access tokens (JWT) and the internal pipeline's service token.

pub mod jwt;
pub mod service_token;

pub use jwt::{AccessClaims, AccessTokenVerifier};
pub use service_token::ServiceTokenVerifier;
