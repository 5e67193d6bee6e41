//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use route53_shift_provider::{
    AwsCredentials, DnsControlPlane, RecordSet, Route53Provider, create_control_plane,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Route 53 测试上下文 - 封装控制面和测试托管区域
pub struct TestContext {
    pub control_plane: Arc<dyn DnsControlPlane>,
    pub zone_id: String,
}

impl TestContext {
    /// 从 `AWS_*` 和 `TEST_HOSTED_ZONE_ID` 环境变量创建
    pub fn route53() -> Option<Self> {
        let credentials = AwsCredentials::from_env()?;
        let zone_id = env::var("TEST_HOSTED_ZONE_ID").ok()?;
        let control_plane = create_control_plane(credentials).ok()?;

        Some(Self {
            control_plane,
            zone_id,
        })
    }

    /// 逐页读取托管区域内全部记录
    pub async fn list_all(&self) -> Vec<RecordSet> {
        let mut records = Vec::new();
        let mut cursor = None;
        loop {
            let Ok(page) = self
                .control_plane
                .list_records(&self.zone_id, cursor.as_ref(), 100)
                .await
            else {
                return records;
            };
            records.extend(page.records);
            match page.next {
                Some(next) => cursor = Some(next),
                None => return records,
            }
        }
    }
}

/// 指向本地 mock server 的 provider（禁用重试）
pub fn mock_provider(endpoint: &str) -> Route53Provider {
    Route53Provider::builder(AwsCredentials::new("AKIDEXAMPLE", "secret"))
        .endpoint(endpoint)
        .max_retries(0)
        .build()
        .expect("mock endpoint should be a valid URL")
}

/// 单条加权别名记录的 XML
pub fn weighted_alias_xml(name: &str, set_id: &str, weight: u64, target: &str) -> String {
    format!(
        "<ResourceRecordSet><Name>{name}</Name><Type>A</Type>\
         <SetIdentifier>{set_id}</SetIdentifier><Weight>{weight}</Weight>\
         <AliasTarget><HostedZoneId>Z26RNL4JYFTOTI</HostedZoneId>\
         <DNSName>{target}</DNSName><EvaluateTargetHealth>false</EvaluateTargetHealth>\
         </AliasTarget></ResourceRecordSet>"
    )
}

/// `ListResourceRecordSetsResponse` 包装
pub fn list_response_xml(records: &[String], next: Option<(&str, &str, &str)>) -> String {
    let tail = match next {
        Some((name, record_type, identifier)) => format!(
            "<IsTruncated>true</IsTruncated><MaxItems>300</MaxItems>\
             <NextRecordName>{name}</NextRecordName><NextRecordType>{record_type}</NextRecordType>\
             <NextRecordIdentifier>{identifier}</NextRecordIdentifier>"
        ),
        None => "<IsTruncated>false</IsTruncated><MaxItems>300</MaxItems>".to_string(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><ResourceRecordSets>{}</ResourceRecordSets>{tail}</ListResourceRecordSetsResponse>"#,
        records.concat()
    )
}
