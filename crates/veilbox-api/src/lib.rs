//! # veilbox-api
//!
//! HTTP API layer for Veilbox built on Axum.
//!
//! Provides the job lifecycle endpoints, the internal pipeline callback,
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
