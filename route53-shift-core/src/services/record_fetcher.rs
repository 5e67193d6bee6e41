//! 记录拉取：跟随分页游标读取托管区域的全部记录

use std::sync::Arc;

use route53_shift_provider::{DnsControlPlane, ProviderError, RecordCursor, RecordSet};

use crate::error::{CoreError, CoreResult};

/// 记录拉取服务
pub struct RecordFetcher {
    control_plane: Arc<dyn DnsControlPlane>,
    page_size: u32,
}

impl RecordFetcher {
    /// 创建拉取服务；`page_size` 会被限制在控制面允许的范围内
    #[must_use]
    pub fn new(control_plane: Arc<dyn DnsControlPlane>, page_size: u32) -> Self {
        let page_size = page_size.clamp(1, control_plane.limits().max_page_size);
        Self {
            control_plane,
            page_size,
        }
    }

    /// Fetch every record set of `zone_id`, following pagination to the end.
    ///
    /// Records are returned in control-plane order. Any page failure fails the
    /// whole fetch: a partial record set is never returned. Failed pages are not
    /// retried here beyond what the control-plane client does itself.
    pub async fn fetch_all(&self, zone_id: &str) -> CoreResult<Vec<RecordSet>> {
        let mut records = Vec::new();
        let mut cursor: Option<RecordCursor> = None;
        let mut pages = 0_usize;

        loop {
            let page = self
                .control_plane
                .list_records(zone_id, cursor.as_ref(), self.page_size)
                .await
                .map_err(CoreError::from)?;
            pages += 1;
            records.extend(page.records);

            match page.next {
                // 游标未前进说明控制面返回异常，避免死循环
                Some(next) if cursor.as_ref() == Some(&next) => {
                    return Err(CoreError::Transport(ProviderError::ParseError {
                        provider: self.control_plane.id().to_string(),
                        detail: format!("pagination cursor did not advance at {}", next.name),
                    }));
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        log::info!(
            "[zone {zone_id}] Fetched {} records in {pages} page(s)",
            records.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockControlPlane, alias_record, auth_error, network_error};

    fn zone_records(count: usize) -> Vec<RecordSet> {
        (0..count)
            .map(|i| alias_record(&format!("r{i}.example.com."), "nlb.example.com."))
            .collect()
    }

    #[tokio::test]
    async fn follows_all_pages() {
        let mock = Arc::new(MockControlPlane::new().with_zone("Z1", zone_records(7)));
        let fetcher = RecordFetcher::new(mock.clone(), 3);

        let records = fetcher.fetch_all("Z1").await.unwrap();

        assert_eq!(records, zone_records(7));
        assert_eq!(mock.list_calls(), 3);
    }

    #[tokio::test]
    async fn empty_zone() {
        let mock = Arc::new(MockControlPlane::new().with_zone("Z1", Vec::new()));
        let records = RecordFetcher::new(mock, 300).fetch_all("Z1").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn page_size_clamped_to_limit() {
        let mock = Arc::new(MockControlPlane::new().with_zone("Z1", zone_records(5)));
        let fetcher = RecordFetcher::new(mock.clone(), 10_000);
        fetcher.fetch_all("Z1").await.unwrap();
        assert_eq!(mock.page_sizes(), vec![300]);
    }

    #[tokio::test]
    async fn transport_failure_mid_pagination() {
        let mock = Arc::new(
            MockControlPlane::new()
                .with_zone("Z1", zone_records(10))
                .fail_list_page(2, network_error()),
        );
        let result = RecordFetcher::new(mock, 4).fetch_all("Z1").await;
        assert!(matches!(result, Err(CoreError::Transport(_))));
    }

    #[tokio::test]
    async fn authorization_failure() {
        let mock = Arc::new(
            MockControlPlane::new()
                .with_zone("Z1", zone_records(1))
                .fail_list_page(1, auth_error()),
        );
        let result = RecordFetcher::new(mock, 300).fetch_all("Z1").await;
        assert!(matches!(result, Err(CoreError::Authorization(_))));
    }

    #[tokio::test]
    async fn unknown_zone_is_transport_error() {
        let mock = Arc::new(MockControlPlane::new());
        let result = RecordFetcher::new(mock, 300).fetch_all("ZMISSING").await;
        assert!(matches!(
            result,
            Err(CoreError::Transport(ProviderError::ZoneNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn stuck_cursor_is_detected() {
        let mock = Arc::new(
            MockControlPlane::new()
                .with_zone("Z1", zone_records(4))
                .with_stuck_cursor(),
        );
        let result = RecordFetcher::new(mock, 1).fetch_all("Z1").await;
        assert!(matches!(
            result,
            Err(CoreError::Transport(ProviderError::ParseError { .. }))
        ));
    }
}
