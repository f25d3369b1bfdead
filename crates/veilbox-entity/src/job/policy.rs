//! Protection policy value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Security options captured verbatim at draft time.
///
/// The policy is immutable for the lifetime of its job; the processing
/// pipeline reads it when the job reaches the `pending` state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct ProtectionPolicy {
    /// Text overlaid on every page/frame of the protected output.
    pub watermark_text: Option<String>,
    /// Enable screenshot deterrence in the viewer.
    pub anti_screenshot: bool,
    /// Disable copy/paste extraction in the viewer.
    pub anti_copy: bool,
    /// Maximum number of views per recipient.
    pub view_limit: Option<i32>,
    /// Restrict viewing to this email domain.
    pub allowed_domain: Option<String>,
    /// Access cutoff for the protected output.
    pub expires_at: Option<DateTime<Utc>>,
}
