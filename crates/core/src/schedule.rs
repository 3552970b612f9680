//! Schedule definition consumed by the reconciliation sweep.

use serde::{Deserialize, Serialize};

use crate::id::ScheduledJobId;

/// The external configuration object describing a recurring task whose group
/// jobs are reconciled.
///
/// Only the stable identifier and the display name matter here; cadence and
/// triggering live with the external timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    pub id: ScheduledJobId,
    pub name: String,
}

impl ScheduleDefinition {
    pub fn new(id: ScheduledJobId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
