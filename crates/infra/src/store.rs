//! Job storage contract and implementations.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use jobmill_core::{GroupKey, Job, JobId, JobStatus, NewJob, ScheduledJobId};

/// Job store abstraction.
///
/// The grouped-job scheduler needs three operations: a distinct-value query
/// over due grouped work, an existence check for an active representative, and
/// record creation. `get`/`update`/`stats` exist for the surrounding executor
/// and for observability.
pub trait JobStore: Send + Sync {
    /// Create a new job record; the store assigns the id and timestamps.
    ///
    /// If the attributes carry `(scheduled_job_id, target_group)` with an
    /// active status and an active representative for that pair already
    /// exists, creation fails with [`JobStoreError::DuplicateActiveGroupJob`].
    fn create(&self, new_job: NewJob) -> Result<Job, JobStoreError>;

    /// Get a job by id.
    fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError>;

    /// Persist an updated job record.
    fn update(&self, job: &Job) -> Result<(), JobStoreError>;

    /// Distinct non-null group keys among due, unclaimed, pending jobs:
    /// `status = pending AND queue IS NULL AND group IS NOT NULL AND
    /// execute_time <= as_of`.
    fn distinct_due_groups(&self, as_of: DateTime<Utc>) -> Result<Vec<GroupKey>, JobStoreError>;

    /// Find an active (pending/ready/running) group job for the given
    /// `(schedule, group)` pair, if one exists.
    fn find_active_group_job(
        &self,
        schedule_id: ScheduledJobId,
        group: &GroupKey,
    ) -> Result<Option<Job>, JobStoreError>;

    /// Per-status record counts.
    fn stats(&self) -> Result<JobStats, JobStoreError>;
}

impl<S: JobStore + ?Sized> JobStore for Arc<S> {
    fn create(&self, new_job: NewJob) -> Result<Job, JobStoreError> {
        (**self).create(new_job)
    }

    fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        (**self).get(id)
    }

    fn update(&self, job: &Job) -> Result<(), JobStoreError> {
        (**self).update(job)
    }

    fn distinct_due_groups(&self, as_of: DateTime<Utc>) -> Result<Vec<GroupKey>, JobStoreError> {
        (**self).distinct_due_groups(as_of)
    }

    fn find_active_group_job(
        &self,
        schedule_id: ScheduledJobId,
        group: &GroupKey,
    ) -> Result<Option<Job>, JobStoreError> {
        (**self).find_active_group_job(schedule_id, group)
    }

    fn stats(&self) -> Result<JobStats, JobStoreError> {
        (**self).stats()
    }
}

/// Job store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("active group job already exists for schedule {scheduled_job_id}, group {group}")]
    DuplicateActiveGroupJob {
        scheduled_job_id: ScheduledJobId,
        group: GroupKey,
    },
    #[error("storage error: {0}")]
    Storage(String),
}

/// Job statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct JobStats {
    pub pending: usize,
    pub ready: usize,
    pub running: usize,
    pub success: usize,
    pub failed: usize,
    pub canceled: usize,
}

/// In-memory job store for tests/dev.
///
/// Enforces the dedup invariant as a uniqueness constraint: at most one active
/// job per `(scheduled_job_id, target_group)` pair can be created, checked
/// under the same write lock as the insert. A durable implementation should
/// back this with a partial unique index.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl JobStore for InMemoryJobStore {
    fn create(&self, new_job: NewJob) -> Result<Job, JobStoreError> {
        let mut jobs = self.jobs.write().unwrap();

        if new_job.status.is_active() {
            if let (Some(schedule_id), Some(group)) =
                (new_job.scheduled_job_id, new_job.target_group.as_ref())
            {
                let duplicate = jobs
                    .values()
                    .any(|j| j.status.is_active() && j.represents(schedule_id, group));
                if duplicate {
                    return Err(JobStoreError::DuplicateActiveGroupJob {
                        scheduled_job_id: schedule_id,
                        group: group.clone(),
                    });
                }
            }
        }

        let job = new_job.into_job(JobId::new(), Utc::now());
        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        let jobs = self.jobs.read().unwrap();
        Ok(jobs.get(&id).cloned())
    }

    fn update(&self, job: &Job) -> Result<(), JobStoreError> {
        let mut jobs = self.jobs.write().unwrap();
        if !jobs.contains_key(&job.id) {
            return Err(JobStoreError::NotFound(job.id));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    fn distinct_due_groups(&self, as_of: DateTime<Utc>) -> Result<Vec<GroupKey>, JobStoreError> {
        let jobs = self.jobs.read().unwrap();

        // BTreeSet gives distinctness plus a stable iteration order; callers
        // must not rely on the ordering.
        let groups: BTreeSet<GroupKey> = jobs
            .values()
            .filter(|j| {
                j.status == JobStatus::Pending && j.queue.is_none() && j.execute_time <= as_of
            })
            .filter_map(|j| j.group.clone())
            .collect();

        Ok(groups.into_iter().collect())
    }

    fn find_active_group_job(
        &self,
        schedule_id: ScheduledJobId,
        group: &GroupKey,
    ) -> Result<Option<Job>, JobStoreError> {
        let jobs = self.jobs.read().unwrap();
        Ok(jobs
            .values()
            .find(|j| j.status.is_active() && j.represents(schedule_id, group))
            .cloned())
    }

    fn stats(&self) -> Result<JobStats, JobStoreError> {
        let jobs = self.jobs.read().unwrap();

        let mut stats = JobStats::default();
        for job in jobs.values() {
            match job.status {
                JobStatus::Pending => stats.pending += 1,
                JobStatus::Ready => stats.ready += 1,
                JobStatus::Running => stats.running += 1,
                JobStatus::Success => stats.success += 1,
                JobStatus::Failed => stats.failed += 1,
                JobStatus::Canceled => stats.canceled += 1,
            }
        }
        Ok(stats)
    }
}
