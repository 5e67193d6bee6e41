//! Route 53 DnsControlPlane trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::strip_zone_prefix;
use crate::traits::{DnsControlPlane, ErrorContext, ProviderErrorMapper};
use crate::types::{Change, ChangeInfo, ControlPlaneLimits, RecordCursor, RecordPage};

use super::types::{
    ChangeResourceRecordSetsRequest, ChangeResourceRecordSetsResponse,
    ListResourceRecordSetsResponse,
};
use super::{MAX_CHANGES_PER_BATCH, MAX_PAGE_SIZE, ROUTE53_API_VERSION, Route53Provider};

impl Route53Provider {
    /// `ListResourceRecordSets` 查询参数
    pub(crate) fn list_params(
        cursor: Option<&RecordCursor>,
        page_size: u32,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("maxitems", page_size.clamp(1, MAX_PAGE_SIZE).to_string())];
        if let Some(cursor) = cursor {
            params.push(("name", cursor.name.clone()));
            if let Some(record_type) = &cursor.record_type {
                params.push(("type", record_type.clone()));
            }
            if let Some(identifier) = &cursor.identifier {
                params.push(("identifier", identifier.clone()));
            }
        }
        params
    }

    fn rrset_path(zone_id: &str) -> String {
        format!(
            "/{ROUTE53_API_VERSION}/hostedzone/{}/rrset",
            strip_zone_prefix(zone_id)
        )
    }
}

#[async_trait]
impl DnsControlPlane for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    fn limits(&self) -> ControlPlaneLimits {
        ControlPlaneLimits {
            max_changes_per_batch: MAX_CHANGES_PER_BATCH,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    async fn list_records(
        &self,
        zone_id: &str,
        cursor: Option<&RecordCursor>,
        page_size: u32,
    ) -> Result<RecordPage> {
        let params = Self::list_params(cursor, page_size);
        let response: ListResourceRecordSetsResponse = self
            .get(
                &Self::rrset_path(zone_id),
                &params,
                ErrorContext::zone(zone_id),
            )
            .await?;

        let page = response
            .into_page()
            .ok_or_else(|| self.parse_error("IsTruncated is true but NextRecordName is missing"))?;

        log::debug!(
            "[{}] Listed {} record sets in {zone_id} (more: {})",
            self.provider_name(),
            page.records.len(),
            page.has_more()
        );
        Ok(page)
    }

    async fn apply_change_batch(
        &self,
        zone_id: &str,
        changes: &[Change],
        comment: Option<&str>,
    ) -> Result<ChangeInfo> {
        if changes.is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "changes".to_string(),
                detail: "change batch must contain at least one change".to_string(),
            });
        }
        if changes.len() > MAX_CHANGES_PER_BATCH {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "changes".to_string(),
                detail: format!(
                    "{} changes exceed the limit of {MAX_CHANGES_PER_BATCH} per batch",
                    changes.len()
                ),
            });
        }

        // 请求路径带尾部斜杠
        let path = format!("{}/", Self::rrset_path(zone_id));
        let body = ChangeResourceRecordSetsRequest::new(changes, comment);
        let response: ChangeResourceRecordSetsResponse =
            self.post(&path, &body, ErrorContext::zone(zone_id)).await?;

        let info = ChangeInfo::from(response.change_info);
        log::info!(
            "[{}] Submitted {} changes to {zone_id}: {} ({})",
            self.provider_name(),
            changes.len(),
            info.id,
            info.status
        );
        Ok(info)
    }
}
