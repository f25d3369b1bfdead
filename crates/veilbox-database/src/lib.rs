//! # veilbox-database
//!
//! Relational persistence for Veilbox: the PostgreSQL connection pool,
//! the migration runner, and the [`stores::JobStore`] contract with its
//! Postgres and in-memory backends.

pub mod connection;
pub mod migration;
pub mod stores;

pub use stores::{JobCounters, JobStore};
