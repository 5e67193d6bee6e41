//! Route 53 HTTP 请求方法

use chrono::Utc;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::Route53Provider;
use super::sign::canonical_query_string;
use super::types::{ErrorResponse, InvalidChangeBatchResponse};

impl Route53Provider {
    // ==================== 辅助方法 ====================

    /// 统一处理 Route 53 响应错误
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        // 变更批次校验失败使用独立的根元素
        if response_text.contains("<InvalidChangeBatch")
            && let Ok(batch) = quick_xml::de::from_str::<InvalidChangeBatchResponse>(response_text)
        {
            log::warn!(
                "[{}] Change batch rejected: {}",
                self.provider_name(),
                batch.messages.items.join("; ")
            );
            return Err(ProviderError::InvalidChangeBatch {
                provider: self.provider_name().to_string(),
                messages: batch.messages.items,
            });
        }

        // 尝试解析结构化错误
        if let Ok(resp) = quick_xml::de::from_str::<ErrorResponse>(response_text) {
            log::error!(
                "[{}] API error: {} - {}",
                self.provider_name(),
                resp.error.code,
                resp.error.message.as_deref().unwrap_or_default()
            );
            return Err(self.map_error(
                RawApiError::with_code(resp.error.code, resp.error.message.unwrap_or_default()),
                ctx,
            ));
        }

        // 回退到按状态码判断
        let raw_message = format!("HTTP {status}: {}", truncate_for_log(response_text));
        Err(match status {
            403 => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw_message),
            },
            404 => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone_id: ctx.zone_id.unwrap_or_default(),
                raw_message: Some(raw_message),
            },
            _ => self.unknown_error(RawApiError::new(raw_message)),
        })
    }

    /// 附加签名相关请求头
    fn signed(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
        query: &str,
        payload: &str,
    ) -> RequestBuilder {
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let authorization = self.sign(method, path, query, payload, &amz_date);

        let request = request
            .header("X-Amz-Date", &amz_date)
            .header("Authorization", authorization);
        match &self.credentials.session_token {
            Some(token) => request.header("X-Amz-Security-Token", token),
            None => request,
        }
    }

    // ==================== 公开 API 方法 ====================

    /// 执行 GET 请求（瞬时错误自动重试）
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let query = canonical_query_string(params);
        let url = if query.is_empty() {
            format!("{}{path}", self.endpoint)
        } else {
            format!("{}{path}?{query}", self.endpoint)
        };

        let request = self.signed(self.client.get(&url), "GET", path, &query, "");

        // 错误检查放在重试循环内，400 Throttling 等也会被重试
        let (_, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            &url,
            self.max_retries,
            |status, text| self.handle_response_error(status, text, ctx.clone()),
        )
        .await?;

        HttpUtils::parse_xml(&response_text, self.provider_name())
    }

    /// 执行 POST 请求（只发送一次，不自动重试）
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = quick_xml::se::to_string(body).map_err(|e| {
            ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            }
        })?;
        let payload = format!(r#"<?xml version="1.0" encoding="UTF-8"?>{payload}"#);

        log::debug!("Request Body: {}", truncate_for_log(&payload));

        let url = format!("{}{path}", self.endpoint);
        let request = self
            .signed(self.client.post(&url), "POST", path, "", &payload)
            .header("Content-Type", "application/xml")
            .body(payload);

        let (_, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "POST",
            &url,
            0,
            |status, text| self.handle_response_error(status, text, ctx.clone()),
        )
        .await?;

        HttpUtils::parse_xml(&response_text, self.provider_name())
    }
}
