//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Extracted at the API boundary and passed into service methods so that
/// every operation knows *who* is acting. The subject is opaque and
/// already verified; the services only ever compare it against job
/// ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated subject.
    pub subject: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            request_time: Utc::now(),
        }
    }
}
