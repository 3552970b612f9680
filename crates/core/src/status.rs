//! Job execution status.

use serde::{Deserialize, Serialize};

/// Status of a job record.
///
/// The "active" subset (`Pending | Ready | Running`) is the one predicate the
/// whole system agrees on: the dedup existence check and the store's
/// uniqueness constraint both use [`JobStatus::is_active`] so the two call
/// sites cannot drift.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created, waiting to be picked up.
    Pending,
    /// Claimed by an executor, not yet started.
    Ready,
    /// Currently being executed.
    Running,
    /// Completed successfully.
    Success,
    /// Terminally failed (retry policy, if any, lives outside this system).
    Failed,
    /// Canceled before completion.
    Canceled,
}

impl JobStatus {
    /// Not yet terminally resolved.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Ready | JobStatus::Running)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Ready => "ready",
            JobStatus::Running => "running",
            JobStatus::Success => "success",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}
