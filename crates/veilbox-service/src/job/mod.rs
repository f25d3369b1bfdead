//! Protection job lifecycle services.

pub mod service;

pub use service::{
    JobService, JobStatusReport, NewDraftJob, NewFileMeta, NewRecipient, UploadProgress,
};
