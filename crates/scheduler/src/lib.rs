//! Grouped-job scheduling and deduplication.
//!
//! Many independently-submitted jobs carry an optional group key. This crate
//! turns due grouped work into *group jobs* — exactly one active
//! representative per `(schedule, group)` pair — and dispatches each group's
//! portion of work through a [`GroupProcessor`] with a bounded limit.
//!
//! ## Operations
//!
//! - [`GroupJobScheduler::prepare`]: the reconciliation sweep. Discovers
//!   distinct due groups lacking an active representative and creates one
//!   group job each.
//! - [`GroupJobScheduler::run`]: dispatch. Resolves the portion limit from
//!   configuration and hands the group key to the processor, exactly once.
//!
//! Everything else — how schedules are configured, how jobs are retried, the
//! worker pool that picks group jobs up — belongs to the surrounding system.

pub mod group;
pub mod processor;

pub use group::{
    DispatchError, GroupJobScheduler, SweepReport, DEFAULT_PORTION_LIMIT, JOB_GROUP_MAX_PORTION,
};
pub use processor::GroupProcessor;
