//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token verification configuration.
///
/// Veilbox only *verifies* credentials; token issuance lives in the
/// identity service that fronts this API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for JWT verification (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Shared credential presented by the internal processing pipeline
    /// on lifecycle callbacks. Empty disables the internal surface.
    #[serde(default)]
    pub service_token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            service_token: String::new(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}
