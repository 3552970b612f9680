//! Infrastructure layer: job persistence and configuration.
//!
//! ## Components
//!
//! - [`JobStore`]: persistence contract for job records (in-memory or durable)
//! - [`InMemoryJobStore`]: store for tests/dev, enforcing the active-group
//!   uniqueness constraint
//! - [`ConfigSource`]: optional-value configuration lookup

pub mod config;
pub mod store;

pub use config::{ConfigSource, StaticConfig};
pub use store::{InMemoryJobStore, JobStats, JobStore, JobStoreError};
