use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Change, ChangeInfo, ControlPlaneLimits, RecordCursor, RecordPage};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（例如 `NoSuchHostedZone`）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 托管区域 ID（用于 `ZoneNotFound`）
    pub zone_id: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS control plane: the two capabilities record migration depends on.
///
/// Any hosted-zone service that can list a zone's record sets page by page and
/// apply an all-or-nothing batch of changes can implement this trait.
#[async_trait]
pub trait DnsControlPlane: Send + Sync {
    /// Control-plane identifier, used as the `provider` field of errors and in logs.
    fn id(&self) -> &'static str;

    /// Request-size limits.
    fn limits(&self) -> ControlPlaneLimits;

    /// Fetch one page of record sets.
    ///
    /// `cursor` is `None` for the first page and the previous page's
    /// [`RecordPage::next`] afterwards. `page_size` is clamped to
    /// [`ControlPlaneLimits::max_page_size`].
    async fn list_records(
        &self,
        zone_id: &str,
        cursor: Option<&RecordCursor>,
        page_size: u32,
    ) -> Result<RecordPage>;

    /// Apply a batch of changes as one transaction.
    ///
    /// Either every change in the batch is accepted or none is.
    async fn apply_change_batch(
        &self,
        zone_id: &str,
        changes: &[Change],
        comment: Option<&str>,
    ) -> Result<ChangeInfo>;
}
