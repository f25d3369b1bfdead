//! `InternalCaller` extractor — admits only the processing pipeline's
//! service credential on the internal surface.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use veilbox_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the internal service credential.
pub const INTERNAL_TOKEN_HEADER: &str = "x-internal-token";

/// Marker extractor proving the request came from the internal pipeline.
#[derive(Debug, Clone, Copy)]
pub struct InternalCaller;

impl FromRequestParts<AppState> for InternalCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(INTERNAL_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing internal service token"))
            .map_err(ApiError::from)?;

        state
            .service_tokens
            .verify(presented)
            .map_err(ApiError::from)?;

        Ok(InternalCaller)
    }
}
