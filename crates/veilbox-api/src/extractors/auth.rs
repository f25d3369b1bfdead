//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, verifies it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use veilbox_core::error::AppError;
use veilbox_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))
            .map_err(ApiError::from)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
            .map_err(ApiError::from)?;

        let claims = state.access_tokens.verify(token).map_err(ApiError::from)?;

        Ok(AuthUser(RequestContext::new(claims.sub)))
    }
}
