//! The grouped-job scheduler: reconciliation sweep and dispatch.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use jobmill_core::{GroupJobData, GroupKey, JobId, NewJob, ScheduleDefinition};
use jobmill_infra::{ConfigSource, JobStore, JobStoreError};

use crate::processor::GroupProcessor;

/// Configuration key for the portion-size limit.
pub const JOB_GROUP_MAX_PORTION: &str = "jobGroupMaxPortion";

/// Portion limit used when the configuration source has no value.
pub const DEFAULT_PORTION_LIMIT: usize = 100;

/// Dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The group job's payload did not carry a usable group key.
    #[error("invalid group job payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Processor failure, passed through unmodified.
    #[error(transparent)]
    Process(#[from] anyhow::Error),
}

/// Outcome of one reconciliation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Group jobs created by this sweep.
    pub created: Vec<JobId>,
    /// Groups skipped because an active representative already covers them.
    pub skipped: usize,
    /// Groups whose creation failed with an isolated store error.
    pub failed: usize,
}

/// Scheduler for grouped jobs.
///
/// Holds the three collaborators the two operations need: the job store (for
/// the sweep), the group processor (for dispatch), and the configuration
/// source (for the portion limit). It never updates or deletes existing job
/// records.
pub struct GroupJobScheduler<S, P, C> {
    store: S,
    processor: P,
    config: C,
}

impl<S, P, C> GroupJobScheduler<S, P, C>
where
    S: JobStore,
    P: GroupProcessor,
    C: ConfigSource,
{
    pub fn new(store: S, processor: P, config: C) -> Self {
        Self {
            store,
            processor,
            config,
        }
    }

    /// Reconciliation sweep: create one group job per distinct due group that
    /// lacks an active representative.
    ///
    /// Failure of the distinct-group query aborts the sweep. Per-group store
    /// failures are isolated: they are logged, counted in the report, and do
    /// not stop the remaining groups from being processed.
    pub fn prepare(
        &self,
        schedule: &ScheduleDefinition,
        as_of: DateTime<Utc>,
    ) -> Result<SweepReport, JobStoreError> {
        let groups = self.store.distinct_due_groups(as_of)?;

        if groups.is_empty() {
            return Ok(SweepReport::default());
        }

        let mut report = SweepReport::default();

        for group in groups {
            match self.prepare_group(schedule, as_of, &group) {
                Ok(Some(job_id)) => report.created.push(job_id),
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    warn!(
                        schedule = %schedule.name,
                        group = %group,
                        error = %e,
                        "failed to create group job, continuing sweep"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            schedule = %schedule.name,
            created = report.created.len(),
            skipped = report.skipped,
            failed = report.failed,
            "group reconciliation sweep finished"
        );

        Ok(report)
    }

    /// Handle one group: skip if an active representative exists, otherwise
    /// create it. Losing the creation race to a concurrent sweep counts as a
    /// skip, not an error.
    fn prepare_group(
        &self,
        schedule: &ScheduleDefinition,
        as_of: DateTime<Utc>,
        group: &GroupKey,
    ) -> Result<Option<JobId>, JobStoreError> {
        if self
            .store
            .find_active_group_job(schedule.id, group)?
            .is_some()
        {
            debug!(schedule = %schedule.name, group = %group, "active group job exists, skipping");
            return Ok(None);
        }

        let name = format!("{} :: {}", schedule.name, group);
        let new_job = NewJob::pending(name, as_of)
            .with_scheduled_job_id(schedule.id)
            .with_target_group(group.clone())
            .with_data(GroupJobData::new(group.clone()).to_value());

        match self.store.create(new_job) {
            Ok(job) => {
                debug!(schedule = %schedule.name, group = %group, job_id = %job.id, "created group job");
                Ok(Some(job.id))
            }
            Err(JobStoreError::DuplicateActiveGroupJob { .. }) => {
                debug!(schedule = %schedule.name, group = %group, "lost creation race, skipping");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Dispatch: process one portion of the payload's group.
    ///
    /// Makes exactly one processor call, with the configured portion limit
    /// (default [`DEFAULT_PORTION_LIMIT`]). Processor failure propagates
    /// unmodified.
    pub fn run(&self, payload: &serde_json::Value) -> Result<(), DispatchError> {
        let limit = self
            .config
            .get_usize(JOB_GROUP_MAX_PORTION)
            .unwrap_or(DEFAULT_PORTION_LIMIT);

        let data: GroupJobData = serde_json::from_value(payload.clone())?;

        debug!(group = %data.group, limit, "dispatching group portion");

        self.processor.process_group(&data.group, limit)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use jobmill_infra::{InMemoryJobStore, StaticConfig};

    /// Records each processor call; optionally fails with a fixed message.
    #[derive(Default)]
    struct RecordingProcessor {
        calls: Mutex<Vec<(GroupKey, usize)>>,
        fail_with: Option<String>,
    }

    impl RecordingProcessor {
        fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }

        fn calls(&self) -> Vec<(GroupKey, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GroupProcessor for RecordingProcessor {
        fn process_group(&self, group: &GroupKey, limit: usize) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push((group.clone(), limit));
            match &self.fail_with {
                Some(message) => Err(anyhow::anyhow!("{message}")),
                None => Ok(()),
            }
        }
    }

    fn group(key: &str) -> GroupKey {
        GroupKey::new(key).unwrap()
    }

    fn scheduler_with(
        config: StaticConfig,
        processor: RecordingProcessor,
    ) -> GroupJobScheduler<InMemoryJobStore, RecordingProcessor, StaticConfig> {
        GroupJobScheduler::new(InMemoryJobStore::new(), processor, config)
    }

    #[test]
    fn run_uses_default_portion_limit() {
        let scheduler = scheduler_with(StaticConfig::new(), RecordingProcessor::default());

        let payload = GroupJobData::new(group("b")).to_value();
        scheduler.run(&payload).unwrap();

        assert_eq!(scheduler.processor.calls(), vec![(group("b"), 100)]);
    }

    #[test]
    fn run_uses_configured_portion_limit() {
        let config = StaticConfig::new().with(JOB_GROUP_MAX_PORTION, 25);
        let scheduler = scheduler_with(config, RecordingProcessor::default());

        let payload = GroupJobData::new(group("sales")).to_value();
        scheduler.run(&payload).unwrap();

        assert_eq!(scheduler.processor.calls(), vec![(group("sales"), 25)]);
    }

    #[test]
    fn run_propagates_processor_failure_unmodified() {
        let scheduler = scheduler_with(
            StaticConfig::new(),
            RecordingProcessor::failing("downstream exploded"),
        );

        let payload = GroupJobData::new(group("b")).to_value();
        let err = scheduler.run(&payload).unwrap_err();

        match err {
            DispatchError::Process(e) => assert_eq!(e.to_string(), "downstream exploded"),
            other => panic!("expected pass-through processor error, got {other:?}"),
        }
        // Exactly one call, no internal retry.
        assert_eq!(scheduler.processor.calls().len(), 1);
    }

    #[test]
    fn run_rejects_payload_without_group() {
        let scheduler = scheduler_with(StaticConfig::new(), RecordingProcessor::default());

        let err = scheduler
            .run(&serde_json::json!({ "portion": 3 }))
            .unwrap_err();

        assert!(matches!(err, DispatchError::Payload(_)));
        assert!(scheduler.processor.calls().is_empty());
    }
}
