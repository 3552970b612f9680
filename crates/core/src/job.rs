//! The job record and its creation attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::group::{GroupKey, QueueName};
use crate::id::{JobId, ScheduledJobId};
use crate::status::JobStatus;

/// A job record as held by the job store.
///
/// The grouped-job scheduler only ever *creates* records and *reads* the
/// status/group/queue fields; status transitions after creation belong to the
/// surrounding executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Store-assigned identifier.
    pub id: JobId,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// Queue assignment; a queued job is claimed by a different dispatch path.
    pub queue: Option<QueueName>,
    /// Group this job's own work belongs to, if any.
    pub group: Option<GroupKey>,
    /// For a group job: the group this record represents.
    pub target_group: Option<GroupKey>,
    /// Back-reference to the schedule definition that spawned this group job.
    pub scheduled_job_id: Option<ScheduledJobId>,
    /// The job becomes eligible to run once this time has passed.
    pub execute_time: DateTime<Utc>,
    /// Human-readable label.
    pub name: String,
    /// Opaque payload handed to the job on dispatch.
    pub data: serde_json::Value,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Mark the job with a new status, bumping `updated_at`.
    pub fn transition(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Whether this record is a group representative for the given pair.
    pub fn represents(&self, schedule_id: ScheduledJobId, group: &GroupKey) -> bool {
        self.scheduled_job_id == Some(schedule_id) && self.target_group.as_ref() == Some(group)
    }
}

/// Attributes for creating a new job record.
///
/// The store assigns `id` and the bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub status: JobStatus,
    pub queue: Option<QueueName>,
    pub group: Option<GroupKey>,
    pub target_group: Option<GroupKey>,
    pub scheduled_job_id: Option<ScheduledJobId>,
    pub execute_time: DateTime<Utc>,
    pub name: String,
    pub data: serde_json::Value,
}

impl NewJob {
    /// A pending job with the given name, due at `execute_time`.
    pub fn pending(name: impl Into<String>, execute_time: DateTime<Utc>) -> Self {
        Self {
            status: JobStatus::Pending,
            queue: None,
            group: None,
            target_group: None,
            scheduled_job_id: None,
            execute_time,
            name: name.into(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_group(mut self, group: GroupKey) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_queue(mut self, queue: QueueName) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn with_target_group(mut self, group: GroupKey) -> Self {
        self.target_group = Some(group);
        self
    }

    pub fn with_scheduled_job_id(mut self, id: ScheduledJobId) -> Self {
        self.scheduled_job_id = Some(id);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Materialize into a full record with a store-assigned id.
    pub fn into_job(self, id: JobId, now: DateTime<Utc>) -> Job {
        Job {
            id,
            status: self.status,
            queue: self.queue,
            group: self.group,
            target_group: self.target_group,
            scheduled_job_id: self.scheduled_job_id,
            execute_time: self.execute_time,
            name: self.name,
            data: self.data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload carried by a group job: `{ "group": <key> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupJobData {
    pub group: GroupKey,
}

impl GroupJobData {
    pub fn new(group: GroupKey) -> Self {
        Self { group }
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Serialization of a string-keyed struct cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
