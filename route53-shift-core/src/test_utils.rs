//! 测试辅助模块
//!
//! 提供脚本化的 `MockControlPlane` 和记录构造方法。

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use route53_shift_provider::{
    AliasTarget, Change, ChangeInfo, ControlPlaneLimits, DnsControlPlane, ProviderError,
    RecordCursor, RecordPage, RecordSet, Result,
};

// ===== 记录构造 =====

pub fn alias_record(name: &str, target: &str) -> RecordSet {
    RecordSet {
        alias_target: Some(AliasTarget {
            hosted_zone_id: "Z26RNL4JYFTOTI".to_string(),
            dns_name: target.to_string(),
            evaluate_target_health: true,
        }),
        ..RecordSet::new(name, "A")
    }
}

pub fn weighted_alias_record(name: &str, set_id: &str, weight: u64, target: &str) -> RecordSet {
    RecordSet {
        set_identifier: Some(set_id.to_string()),
        weight: Some(weight),
        health_check_id: Some("abcdef11-2222-3333-4444-555555fedcba".to_string()),
        ..alias_record(name, target)
    }
}

pub fn plain_record(name: &str, record_type: &str, value: &str) -> RecordSet {
    RecordSet {
        ttl: Some(300),
        resource_records: vec![value.to_string()],
        ..RecordSet::new(name, record_type)
    }
}

// ===== 错误构造 =====

pub fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: "connection reset by peer".to_string(),
    }
}

pub fn auth_error() -> ProviderError {
    ProviderError::InvalidCredentials {
        provider: "mock".to_string(),
        raw_message: Some("The security token included in the request is invalid".to_string()),
    }
}

// ===== MockControlPlane =====

#[derive(Default)]
struct MockState {
    list_calls: usize,
    page_sizes: Vec<u32>,
    apply_calls: usize,
    batches: Vec<Vec<Change>>,
    comments: Vec<Option<String>>,
}

/// 内存控制面：按页返回记录，按调用序号或内容注入失败，并记录所有调用
#[derive(Default)]
pub struct MockControlPlane {
    zones: HashMap<String, Vec<RecordSet>>,
    /// 第 n 次 `list_records` 调用失败（1-based，全局计数）
    list_failures: HashMap<usize, ProviderError>,
    zone_failures: HashMap<String, ProviderError>,
    /// 第 n 次 `apply_change_batch` 调用失败（1-based，全局计数）
    batch_failures: HashMap<usize, ProviderError>,
    /// 包含指定记录名的批次失败
    content_failures: Vec<(String, ProviderError)>,
    stuck_cursor: bool,
    state: Mutex<MockState>,
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone_id: &str, records: Vec<RecordSet>) -> Self {
        self.zones.insert(zone_id.to_string(), records);
        self
    }

    pub fn fail_list_page(mut self, call: usize, error: ProviderError) -> Self {
        self.list_failures.insert(call, error);
        self
    }

    pub fn fail_list_zone(mut self, zone_id: &str, error: ProviderError) -> Self {
        self.zone_failures.insert(zone_id.to_string(), error);
        self
    }

    pub fn fail_batch(mut self, call: usize, error: ProviderError) -> Self {
        self.batch_failures.insert(call, error);
        self
    }

    pub fn fail_batch_containing(mut self, record_name: &str, error: ProviderError) -> Self {
        self.content_failures.push((record_name.to_string(), error));
        self
    }

    /// 后续页返回与请求相同的游标
    pub fn with_stuck_cursor(mut self) -> Self {
        self.stuck_cursor = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn page_sizes(&self) -> Vec<u32> {
        self.state.lock().unwrap().page_sizes.clone()
    }

    pub fn apply_calls(&self) -> usize {
        self.state.lock().unwrap().apply_calls
    }

    /// 所有提交过的批次（包括失败的）
    pub fn submitted_batches(&self) -> Vec<Vec<Change>> {
        self.state.lock().unwrap().batches.clone()
    }

    pub fn comments(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().comments.clone()
    }
}

#[async_trait]
impl DnsControlPlane for MockControlPlane {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn limits(&self) -> ControlPlaneLimits {
        ControlPlaneLimits {
            max_changes_per_batch: 1000,
            max_page_size: 300,
        }
    }

    async fn list_records(
        &self,
        zone_id: &str,
        cursor: Option<&RecordCursor>,
        page_size: u32,
    ) -> Result<RecordPage> {
        let call = {
            let mut state = self.state.lock().unwrap();
            state.list_calls += 1;
            state.page_sizes.push(page_size);
            state.list_calls
        };

        if let Some(e) = self.list_failures.get(&call) {
            return Err(e.clone());
        }
        if let Some(e) = self.zone_failures.get(zone_id) {
            return Err(e.clone());
        }
        let Some(records) = self.zones.get(zone_id) else {
            return Err(ProviderError::ZoneNotFound {
                provider: "mock".to_string(),
                zone_id: zone_id.to_string(),
                raw_message: None,
            });
        };

        // 游标的 identifier 保存下一页起始偏移
        let start = cursor
            .and_then(|c| c.identifier.as_deref())
            .and_then(|id| id.parse::<usize>().ok())
            .unwrap_or(0);
        let size = page_size.clamp(1, self.limits().max_page_size) as usize;
        let end = (start + size).min(records.len());

        let next = if end < records.len() {
            match cursor {
                Some(c) if self.stuck_cursor => Some(c.clone()),
                _ => Some(RecordCursor {
                    name: records[end].name.clone(),
                    record_type: Some(records[end].record_type.clone()),
                    identifier: Some(end.to_string()),
                }),
            }
        } else {
            None
        };

        Ok(RecordPage {
            records: records[start.min(end)..end].to_vec(),
            next,
        })
    }

    async fn apply_change_batch(
        &self,
        _zone_id: &str,
        changes: &[Change],
        comment: Option<&str>,
    ) -> Result<ChangeInfo> {
        let call = {
            let mut state = self.state.lock().unwrap();
            state.apply_calls += 1;
            state.batches.push(changes.to_vec());
            state.comments.push(comment.map(str::to_string));
            state.apply_calls
        };

        if let Some(e) = self.batch_failures.get(&call) {
            return Err(e.clone());
        }
        if let Some((_, e)) = self
            .content_failures
            .iter()
            .find(|(name, _)| changes.iter().any(|c| &c.record_set.name == name))
        {
            return Err(e.clone());
        }

        Ok(ChangeInfo {
            id: format!("/change/C{call:04}"),
            status: "PENDING".to_string(),
            submitted_at: None,
            comment: comment.map(str::to_string),
        })
    }
}
