//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use veilbox_entity::recipient::RecipientSource;

/// Security options of a new job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyRequest {
    /// Watermark text overlaid on the protected output.
    pub watermark_text: Option<String>,
    /// Enable screenshot deterrence.
    #[serde(default)]
    pub anti_screenshot: bool,
    /// Disable copy/paste extraction.
    #[serde(default)]
    pub anti_copy: bool,
    /// Maximum number of views per recipient.
    pub view_limit: Option<i32>,
    /// Restrict viewing to this email domain.
    pub allowed_domain: Option<String>,
    /// Access cutoff.
    pub expires_at: Option<DateTime<Utc>>,
}

/// One recipient entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipientEntry {
    /// Recipient email address.
    #[validate(email(message = "Invalid recipient email"))]
    pub email: String,
    /// How the entry was captured.
    #[serde(default = "default_source")]
    pub source: RecipientSource,
}

/// One file declaration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FileEntry {
    /// Destination folder name.
    #[validate(length(min = 1, max = 255))]
    pub folder_name: String,
    /// Original display name.
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    /// Declared size in bytes.
    #[validate(range(min = 0))]
    pub size_bytes: i64,
}

/// Create job request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobRequest {
    /// Security options.
    #[serde(default)]
    pub policy: PolicyRequest,
    /// Addressees of the protected output.
    #[validate(
        length(min = 1, message = "At least one recipient is required"),
        nested
    )]
    pub recipients: Vec<RecipientEntry>,
    /// Files the client will upload.
    #[validate(length(min = 1, message = "At least one file is required"), nested)]
    pub files: Vec<FileEntry>,
}

/// Internal completion callback body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteJobRequest {
    /// Subject that owns the job, echoed by the pipeline.
    #[validate(length(min = 1, message = "Owner subject is required"))]
    pub owner: String,
}

fn default_source() -> RecipientSource {
    RecipientSource::Direct
}
