//! # veilbox-service
//!
//! Business logic for the protection job core: draft registration, the
//! resumable upload tracker, status reporting, the submission gate, and
//! the pipeline-triggered lifecycle advance.

pub mod context;
pub mod job;

pub use context::RequestContext;
pub use job::service::JobService;
