//! # veilbox-core
//!
//! Core crate for Veilbox. Contains configuration schemas, the unified
//! error system, and the collaborator traits the job core consumes.
//!
//! This crate has **no** internal dependencies on other Veilbox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
