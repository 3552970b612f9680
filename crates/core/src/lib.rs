//! `jobmill-core` — domain foundation for the grouped-job system.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the job record and its status lifecycle, group
//! and queue value objects, and the schedule definition consumed by the
//! reconciliation sweep.

pub mod error;
pub mod group;
pub mod id;
pub mod job;
pub mod schedule;
pub mod status;

pub use error::{DomainError, DomainResult};
pub use group::{GroupKey, QueueName};
pub use id::{JobId, ScheduledJobId};
pub use job::{GroupJobData, Job, NewJob};
pub use schedule::ScheduleDefinition;
pub use status::JobStatus;
