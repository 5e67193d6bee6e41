//! AWS Signature Version 4
//!
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv-create-signed-request.html>

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{ROUTE53_SIGNING_REGION, ROUTE53_SIGNING_SERVICE, Route53Provider};

/// Build a canonical query string: RFC 3986-encoded pairs sorted by key, then value.
///
/// The same string must be used for the request URL and for signing.
pub(crate) fn canonical_query_string(params: &[(&str, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

impl Route53Provider {
    /// 生成 `AWS4-HMAC-SHA256` Authorization 头
    ///
    /// 签名头: `host`, `x-amz-date`，以及使用临时凭证时的 `x-amz-security-token`
    pub(crate) fn sign(
        &self,
        method: &str,
        path: &str,
        canonical_query: &str,
        payload: &str,
        amz_date: &str,
    ) -> String {
        // 1. 规范化请求头（按名称排序）
        let mut headers: Vec<(&str, &str)> =
            vec![("host", self.host.as_str()), ("x-amz-date", amz_date)];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("x-amz-security-token", token.as_str()));
        }
        headers.sort_by(|a, b| a.0.cmp(b.0));

        let canonical_headers = headers.iter().fold(String::new(), |mut acc, (k, v)| {
            let _ = writeln!(acc, "{k}:{}", v.trim());
            acc
        });
        let signed_headers = headers
            .iter()
            .map(|(k, _)| *k)
            .collect::<Vec<_>>()
            .join(";");

        // 2. 规范化请求
        let hashed_payload = hex::encode(Sha256::digest(payload.as_bytes()));
        let canonical_request = format!(
            "{method}\n{path}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}"
        );

        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        // 3. 待签名字符串
        let date_stamp = amz_date.get(..8).unwrap_or(amz_date);
        let scope =
            format!("{date_stamp}/{ROUTE53_SIGNING_REGION}/{ROUTE53_SIGNING_SERVICE}/aws4_request");
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign =
            format!("AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{hashed_canonical_request}");

        log::debug!("StringToSign:\n{string_to_sign}");

        // 4. 派生签名密钥并计算签名
        let k_secret = format!("AWS4{}", self.credentials.secret_access_key);
        let k_date = hmac_sha256(k_secret.as_bytes(), date_stamp.as_bytes());
        let k_region = hmac_sha256(&k_date, ROUTE53_SIGNING_REGION.as_bytes());
        let k_service = hmac_sha256(&k_region, ROUTE53_SIGNING_SERVICE.as_bytes());
        let k_signing = hmac_sha256(&k_service, b"aws4_request");
        let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

        format!(
            "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.credentials.access_key_id
        )
    }
}
