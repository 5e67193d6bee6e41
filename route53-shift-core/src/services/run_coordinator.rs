//! 运行协调：按托管区域依次执行 拉取 → 构建 → 提交

use std::sync::Arc;

use chrono::Utc;
use route53_shift_provider::{Change, DnsControlPlane, RecordSet};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::services::batch_submitter::{BatchSubmitter, DEFAULT_BATCH_SIZE};
use crate::services::change_builder::{build_repoint_changes, build_weight_changes};
use crate::services::record_fetcher::RecordFetcher;
use crate::types::{RunReport, Target, TargetReport, WorkItem, ZoneReport};

/// Default number of record sets requested per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    pub batch_size: usize,
    /// Build and report changes without submitting them.
    pub dry_run: bool,
    pub comment: Option<String>,
    pub max_concurrent_batches: usize,
    pub page_size: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
            comment: None,
            max_concurrent_batches: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 运行协调服务
pub struct RunCoordinator {
    fetcher: RecordFetcher,
    submitter: BatchSubmitter,
    dry_run: bool,
}

impl RunCoordinator {
    /// 创建协调服务；批次大小超出控制面限制时返回 `InvalidArgument`
    pub fn new(control_plane: Arc<dyn DnsControlPlane>, options: RunOptions) -> CoreResult<Self> {
        let submitter = BatchSubmitter::new(control_plane.clone(), options.batch_size)?
            .with_max_concurrent(options.max_concurrent_batches)
            .with_comment(options.comment);

        Ok(Self {
            fetcher: RecordFetcher::new(control_plane, options.page_size),
            submitter,
            dry_run: options.dry_run,
        })
    }

    /// Execute `plan` and report everything that happened.
    ///
    /// Work items sharing a zone are processed together against a single fetch
    /// of that zone, in the order the zone first appears. A fetch failure skips
    /// the zone; an authorization failure stops the run.
    pub async fn run(&self, plan: &[WorkItem]) -> RunReport {
        let started_at = Utc::now();
        let mut zones = Vec::new();
        let mut aborted = None;

        for (zone_id, targets) in group_by_zone(plan) {
            let (report, fatal) = self.run_zone(zone_id, targets).await;
            zones.push(report);

            if let Some(err) = fatal {
                log::error!("[zone {zone_id}] Aborting run: {err}");
                aborted = Some(err);
                break;
            }
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            dry_run: self.dry_run,
            zones,
            aborted,
        };
        log::info!(
            "Run finished: {} zone(s), {} records, {} changes, {}/{} batches failed",
            report.zones.len(),
            report.total_records_fetched(),
            report.total_changes_found(),
            report.failed_batches(),
            report.total_batches()
        );
        report
    }

    /// Returns the zone report and, when the run must stop, the fatal error.
    async fn run_zone(
        &self,
        zone_id: &str,
        targets: Vec<Target>,
    ) -> (ZoneReport, Option<CoreError>) {
        log::info!("[zone {zone_id}] Processing {} target(s)", targets.len());
        let mut report = ZoneReport::new(zone_id);

        // 先校验输入，全部无效时不访问控制面
        let checked: Vec<(Target, CoreResult<()>)> = targets
            .into_iter()
            .map(|target| {
                let valid = if zone_id.trim().is_empty() {
                    Err(CoreError::InvalidArgument("zone id must not be empty".into()))
                } else {
                    target.validate()
                };
                (target, valid)
            })
            .collect();

        if checked.iter().all(|(_, valid)| valid.is_err()) {
            report.targets = checked
                .into_iter()
                .filter_map(|(target, valid)| valid.err().map(|e| TargetReport::failed(target, e)))
                .collect();
            return (report, None);
        }

        let records = match self.fetcher.fetch_all(zone_id).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("[zone {zone_id}] Fetch failed: {e}");
                let fatal = e.is_fatal().then(|| e.clone());
                report.error = Some(e);
                return (report, fatal);
            }
        };
        report.records_fetched = records.len();

        for (target, valid) in checked {
            if let Err(e) = valid {
                log::warn!("[zone {zone_id}] {target}: {e}");
                report.targets.push(TargetReport::failed(target, e));
                continue;
            }

            let target_report = self.run_target(zone_id, &records, target).await;
            let fatal = target_report
                .batches
                .iter()
                .filter_map(|b| b.error())
                .find(|e| e.is_fatal())
                .cloned();
            report.targets.push(target_report);

            if fatal.is_some() {
                return (report, fatal);
            }
        }

        (report, None)
    }

    async fn run_target(&self, zone_id: &str, records: &[RecordSet], target: Target) -> TargetReport {
        let built: CoreResult<Vec<Change>> = match &target {
            Target::Repoint(pair) => Ok(build_repoint_changes(records, &pair.old, &pair.new)),
            Target::Weight { target, weight } => build_weight_changes(records, target, *weight),
        };
        let changes = match built {
            Ok(changes) => changes,
            Err(e) => {
                log::warn!("[zone {zone_id}] {target}: {e}");
                return TargetReport::failed(target, e);
            }
        };

        log::info!("[zone {zone_id}] {target}: found {} changes", changes.len());

        let mut report = TargetReport::new(target);
        report.changes_found = changes.len();

        if changes.is_empty() {
            log::info!("[zone {zone_id}] No changes found, skipping submission");
        } else if self.dry_run {
            log::info!(
                "[zone {zone_id}] Dry run: {} changes in {} batch(es) not submitted",
                changes.len(),
                changes.len().div_ceil(self.submitter.batch_size())
            );
        } else {
            report.batches = self.submitter.submit(zone_id, &changes).await;
        }

        report.changes = changes;
        report
    }
}

/// Group targets by zone, zones in order of first appearance.
fn group_by_zone(plan: &[WorkItem]) -> Vec<(&str, Vec<Target>)> {
    let mut groups: Vec<(&str, Vec<Target>)> = Vec::new();
    for item in plan {
        let zone_id = item.zone_id();
        match groups.iter_mut().find(|(z, _)| *z == zone_id) {
            Some((_, targets)) => targets.extend(item.targets()),
            None => groups.push((zone_id, item.targets())),
        }
    }
    groups
}
