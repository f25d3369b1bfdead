//! JWT access token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use veilbox_core::config::auth::AuthConfig;
use veilbox_core::error::AppError;
use veilbox_core::result::AppResult;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Authenticated subject — the opaque account identity that owns jobs.
    pub sub: String,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Verifies HS256 access tokens issued by the external identity service.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenVerifier").finish()
    }
}

impl AccessTokenVerifier {
    /// Create a verifier from the shared-secret configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return its claims.
    ///
    /// Expiration is validated; any failure (bad signature, malformed
    /// token, expired) is reported uniformly as unauthorized.
    pub fn verify(&self, token: &str) -> AppResult<AccessClaims> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))
    }
}
