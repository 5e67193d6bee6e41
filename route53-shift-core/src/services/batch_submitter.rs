//! 分批提交：把变更切分为固定大小的批次，逐批独立提交

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use route53_shift_provider::{Change, DnsControlPlane};

use crate::error::{CoreError, CoreResult};
use crate::types::BatchResult;

/// Default number of changes per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// 分批提交服务
pub struct BatchSubmitter {
    control_plane: Arc<dyn DnsControlPlane>,
    batch_size: usize,
    max_concurrent: usize,
    comment: Option<String>,
}

impl BatchSubmitter {
    /// 创建提交服务
    ///
    /// `batch_size` 必须在 `1..=max_changes_per_batch` 范围内。
    pub fn new(control_plane: Arc<dyn DnsControlPlane>, batch_size: usize) -> CoreResult<Self> {
        let limit = control_plane.limits().max_changes_per_batch;
        if batch_size == 0 || batch_size > limit {
            return Err(CoreError::InvalidArgument(format!(
                "batch size must be between 1 and {limit}, got {batch_size}"
            )));
        }

        Ok(Self {
            control_plane,
            batch_size,
            max_concurrent: 1,
            comment: None,
        })
    }

    /// Submit up to `n` batches at once (default 1). Zero is treated as 1.
    #[must_use]
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    /// Comment attached to every change batch.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Maximum number of changes sent in one change batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Submit `changes` to `zone_id` in contiguous batches.
    ///
    /// Returns one result per batch, in batch order. A failed batch never stops
    /// the following ones; an empty `changes` slice makes no call at all.
    pub async fn submit(&self, zone_id: &str, changes: &[Change]) -> Vec<BatchResult> {
        let batches: Vec<&[Change]> = changes.chunks(self.batch_size).collect();
        let total = batches.len();

        // buffered 保持输出顺序与输入批次一致
        stream::iter(batches.into_iter().enumerate())
            .map(|(i, batch)| self.submit_batch(zone_id, i + 1, total, batch))
            .buffered(self.max_concurrent)
            .collect()
            .await
    }

    async fn submit_batch(
        &self,
        zone_id: &str,
        batch_index: usize,
        total: usize,
        batch: &[Change],
    ) -> BatchResult {
        log::info!(
            "[zone {zone_id}] Batch {batch_index}/{total}: submitting {} changes",
            batch.len()
        );

        match self
            .control_plane
            .apply_change_batch(zone_id, batch, self.comment.as_deref())
            .await
        {
            Ok(info) => {
                log::info!(
                    "[zone {zone_id}] Batch {batch_index}/{total} submitted: {} ({})",
                    info.id,
                    info.status
                );
                BatchResult::Success {
                    batch_index,
                    change_count: batch.len(),
                    change_id: info.id,
                    status: info.status,
                }
            }
            Err(e) => {
                let error = CoreError::from(e);
                if error.is_expected() {
                    log::warn!("[zone {zone_id}] Batch {batch_index}/{total} failed: {error}");
                } else {
                    log::error!("[zone {zone_id}] Batch {batch_index}/{total} failed: {error}");
                }
                BatchResult::Failure {
                    batch_index,
                    change_count: batch.len(),
                    error,
                }
            }
        }
    }
}
