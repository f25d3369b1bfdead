//! Storage key generation for registered file slots.
//!
//! Key format: `jobs/{job_id}/{token}-{sanitized file name}`. The job id
//! is already unique and the token is a fresh v4 UUID, so keys need no
//! collision check; the display name is kept in the key for debuggability.

use uuid::Uuid;

/// Longest sanitized name segment carried into a storage key.
const MAX_NAME_SEGMENT: usize = 120;

/// Generate the storage key for one file slot of a job.
///
/// Keys are assigned once at draft time and never regenerated, so every
/// re-upload of a slot targets the same blob.
pub fn file_storage_key(job_id: Uuid, file_name: &str) -> String {
    format!(
        "jobs/{}/{}-{}",
        job_id,
        Uuid::new_v4().simple(),
        sanitize_name(file_name)
    )
}

/// Reduce a display name to a key-safe segment.
fn sanitize_name(name: &str) -> String {
    let mut cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.truncate(MAX_NAME_SEGMENT);
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
