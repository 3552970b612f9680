//! Downstream processing contract for a group's portion of work.

use std::sync::Arc;

use jobmill_core::GroupKey;

/// Processes up to `limit` queued units belonging to `group`.
///
/// Failure is implementation-defined; the scheduler propagates it untouched —
/// no retry, no translation. Retry/backoff policy belongs to the executor
/// that owns the group job's status transitions.
pub trait GroupProcessor: Send + Sync {
    fn process_group(&self, group: &GroupKey, limit: usize) -> anyhow::Result<()>;
}

impl<P: GroupProcessor + ?Sized> GroupProcessor for Arc<P> {
    fn process_group(&self, group: &GroupKey, limit: usize) -> anyhow::Result<()> {
        (**self).process_group(group, limit)
    }
}
