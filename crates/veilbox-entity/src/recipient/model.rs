//! Recipient entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How a recipient entered the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recipient_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecipientSource {
    /// Entered one-by-one in the client.
    Direct,
    /// Imported from a CSV batch.
    Csv,
}

/// An addressee of the protected output.
///
/// Descriptive only: the job core persists recipients at draft time and
/// never reads them for control decisions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipient {
    /// Unique recipient row identifier.
    pub id: Uuid,
    /// Owning job.
    pub job_id: Uuid,
    /// Recipient email address.
    pub email: String,
    /// Provenance of the entry.
    pub source: RecipientSource,
    /// When the recipient was registered.
    pub created_at: DateTime<Utc>,
}

impl Recipient {
    /// Build a recipient row for a draft job.
    pub fn new(job_id: Uuid, email: impl Into<String>, source: RecipientSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            email: email.into(),
            source,
            created_at: Utc::now(),
        }
    }
}
