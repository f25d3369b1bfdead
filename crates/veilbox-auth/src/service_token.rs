//! Internal service token verification.
//!
//! The lifecycle-completion callback comes from the internal processing
//! pipeline, not from end users, so it authenticates with a shared
//! service credential instead of a user JWT.

use veilbox_core::config::auth::AuthConfig;
use veilbox_core::error::AppError;
use veilbox_core::result::AppResult;

/// Verifies the shared credential presented by the processing pipeline.
#[derive(Debug, Clone)]
pub struct ServiceTokenVerifier {
    token: String,
}

impl ServiceTokenVerifier {
    /// Create a verifier from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            token: config.service_token.clone(),
        }
    }

    /// Check a presented credential against the configured token.
    ///
    /// An empty configured token disables the internal surface entirely.
    pub fn verify(&self, presented: &str) -> AppResult<()> {
        if self.token.is_empty() {
            return Err(AppError::service_unavailable(
                "Internal service token is not configured",
            ));
        }
        if presented.len() == self.token.len()
            && constant_time_eq(presented.as_bytes(), self.token.as_bytes())
        {
            Ok(())
        } else {
            Err(AppError::forbidden("Invalid service token"))
        }
    }
}

/// Byte comparison that always scans the full slice.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
