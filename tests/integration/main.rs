//! Router-level integration tests.
//!
//! The harness wires the real router over the in-memory job store and a
//! temp-dir blob store, so the suite runs without Postgres or S3. Token
//! verification is the production code path; the harness mints tokens
//! against the test secret.

mod helpers;

mod health_test;
mod job_test;
mod upload_test;
