//! 运行报告类型

use chrono::{DateTime, Utc};
use route53_shift_provider::Change;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Target;

/// Outcome of one submitted change batch. `batch_index` is 1-based.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum BatchResult {
    #[serde(rename_all = "camelCase")]
    Success {
        batch_index: usize,
        change_count: usize,
        change_id: String,
        status: String,
    },
    #[serde(rename_all = "camelCase")]
    Failure {
        batch_index: usize,
        change_count: usize,
        error: CoreError,
    },
}

impl BatchResult {
    pub fn batch_index(&self) -> usize {
        match self {
            Self::Success { batch_index, .. } | Self::Failure { batch_index, .. } => *batch_index,
        }
    }

    pub fn change_count(&self) -> usize {
        match self {
            Self::Success { change_count, .. } | Self::Failure { change_count, .. } => {
                *change_count
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

/// Result of one endpoint pair or weight target within a zone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReport {
    pub target: Target,
    pub changes_found: usize,
    /// Changes that were built; kept so dry runs can show them.
    pub changes: Vec<Change>,
    pub batches: Vec<BatchResult>,
    /// Set when the target was rejected before any submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CoreError>,
}

impl TargetReport {
    pub(crate) fn new(target: Target) -> Self {
        Self {
            target,
            changes_found: 0,
            changes: Vec::new(),
            batches: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn failed(target: Target, error: CoreError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(target)
        }
    }

    pub fn failed_batches(&self) -> usize {
        self.batches.iter().filter(|b| !b.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failed_batches() == 0
    }
}

/// Result of all work configured for one hosted zone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReport {
    pub zone_id: String,
    pub records_fetched: usize,
    pub targets: Vec<TargetReport>,
    /// Set when the zone's records could not be fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CoreError>,
}

impl ZoneReport {
    pub(crate) fn new(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            records_fetched: 0,
            targets: Vec::new(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.targets.iter().all(TargetReport::is_success)
    }
}

/// Everything a caller can observe about one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub zones: Vec<ZoneReport>,
    /// Authorization failure that stopped the remaining work items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<CoreError>,
}

impl RunReport {
    pub fn total_records_fetched(&self) -> usize {
        self.zones.iter().map(|z| z.records_fetched).sum()
    }

    pub fn total_changes_found(&self) -> usize {
        self.targets().map(|t| t.changes_found).sum()
    }

    pub fn total_batches(&self) -> usize {
        self.targets().map(|t| t.batches.len()).sum()
    }

    pub fn failed_batches(&self) -> usize {
        self.targets().map(TargetReport::failed_batches).sum()
    }

    /// No abort, no zone or target error and no failed batch.
    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.zones.iter().all(ZoneReport::is_success)
    }

    fn targets(&self) -> impl Iterator<Item = &TargetReport> {
        self.zones.iter().flat_map(|z| z.targets.iter())
    }
}
