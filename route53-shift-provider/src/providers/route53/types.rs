//! Route 53 XML wire types
//!
//! Field order inside each serialized struct follows the 2013-04-01 schema;
//! Route 53 rejects out-of-order elements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AliasTarget, Change, ChangeInfo, CidrRoutingConfig, GeoLocation, GeoProximityLocation,
    RecordCursor, RecordPage, RecordSet,
};

use super::ROUTE53_XMLNS;

// ============ ListResourceRecordSets ============

#[derive(Debug, Deserialize)]
pub(crate) struct ListResourceRecordSetsResponse {
    #[serde(rename = "ResourceRecordSets", default)]
    pub resource_record_sets: XmlRecordSets,
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    #[serde(rename = "NextRecordName")]
    pub next_record_name: Option<String>,
    #[serde(rename = "NextRecordType")]
    pub next_record_type: Option<String>,
    #[serde(rename = "NextRecordIdentifier")]
    pub next_record_identifier: Option<String>,
}

impl ListResourceRecordSetsResponse {
    /// 转换为分页结果；`IsTruncated` 为 false 时没有后续游标
    ///
    /// Returns `None` when the page claims to be truncated but names no next record.
    pub fn into_page(self) -> Option<RecordPage> {
        let next = if self.is_truncated {
            Some(RecordCursor {
                name: self.next_record_name?,
                record_type: self.next_record_type,
                identifier: self.next_record_identifier,
            })
        } else {
            None
        };

        Some(RecordPage {
            records: self
                .resource_record_sets
                .items
                .into_iter()
                .map(RecordSet::from)
                .collect(),
            next,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct XmlRecordSets {
    #[serde(rename = "ResourceRecordSet", default)]
    pub items: Vec<XmlRecordSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlRecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "SetIdentifier", skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    #[serde(rename = "Weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    #[serde(rename = "Region", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "GeoLocation", skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<XmlGeoLocation>,
    #[serde(rename = "Failover", skip_serializing_if = "Option::is_none")]
    pub failover: Option<String>,
    #[serde(rename = "MultiValueAnswer", skip_serializing_if = "Option::is_none")]
    pub multi_value_answer: Option<bool>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(rename = "ResourceRecords", skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<XmlResourceRecords>,
    #[serde(rename = "AliasTarget", skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<XmlAliasTarget>,
    #[serde(rename = "HealthCheckId", skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
    #[serde(rename = "TrafficPolicyInstanceId", skip_serializing_if = "Option::is_none")]
    pub traffic_policy_instance_id: Option<String>,
    #[serde(rename = "CidrRoutingConfig", skip_serializing_if = "Option::is_none")]
    pub cidr_routing_config: Option<XmlCidrRoutingConfig>,
    #[serde(rename = "GeoProximityLocation", skip_serializing_if = "Option::is_none")]
    pub geo_proximity_location: Option<XmlGeoProximityLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct XmlResourceRecords {
    #[serde(rename = "ResourceRecord", default)]
    pub items: Vec<XmlResourceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlResourceRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlAliasTarget {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "EvaluateTargetHealth", default)]
    pub evaluate_target_health: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlGeoLocation {
    #[serde(rename = "ContinentCode", skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(rename = "CountryCode", skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "SubdivisionCode", skip_serializing_if = "Option::is_none")]
    pub subdivision_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlCidrRoutingConfig {
    #[serde(rename = "CollectionId")]
    pub collection_id: String,
    #[serde(rename = "LocationName")]
    pub location_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlGeoProximityLocation {
    #[serde(rename = "AWSRegion", skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(rename = "LocalZoneGroup", skip_serializing_if = "Option::is_none")]
    pub local_zone_group: Option<String>,
    #[serde(rename = "Coordinates", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<XmlCoordinates>,
    #[serde(rename = "Bias", skip_serializing_if = "Option::is_none")]
    pub bias: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct XmlCoordinates {
    #[serde(rename = "Latitude")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    pub longitude: String,
}

// ============ 与领域类型互转 ============

impl From<XmlRecordSet> for RecordSet {
    fn from(x: XmlRecordSet) -> Self {
        Self {
            name: x.name,
            record_type: x.record_type,
            set_identifier: x.set_identifier,
            weight: x.weight,
            region: x.region,
            geo_location: x.geo_location.map(|g| GeoLocation {
                continent_code: g.continent_code,
                country_code: g.country_code,
                subdivision_code: g.subdivision_code,
            }),
            failover: x.failover,
            multi_value_answer: x.multi_value_answer,
            ttl: x.ttl,
            resource_records: x
                .resource_records
                .map(|rr| rr.items.into_iter().map(|r| r.value).collect())
                .unwrap_or_default(),
            alias_target: x.alias_target.map(|a| AliasTarget {
                hosted_zone_id: a.hosted_zone_id,
                dns_name: a.dns_name,
                evaluate_target_health: a.evaluate_target_health,
            }),
            health_check_id: x.health_check_id,
            traffic_policy_instance_id: x.traffic_policy_instance_id,
            cidr_routing_config: x.cidr_routing_config.map(|c| CidrRoutingConfig {
                collection_id: c.collection_id,
                location_name: c.location_name,
            }),
            geo_proximity_location: x.geo_proximity_location.map(|g| {
                let (latitude, longitude) = g
                    .coordinates
                    .map_or((None, None), |c| (Some(c.latitude), Some(c.longitude)));
                GeoProximityLocation {
                    aws_region: g.aws_region,
                    local_zone_group: g.local_zone_group,
                    latitude,
                    longitude,
                    bias: g.bias,
                }
            }),
        }
    }
}

impl From<&RecordSet> for XmlRecordSet {
    fn from(r: &RecordSet) -> Self {
        Self {
            name: r.name.clone(),
            record_type: r.record_type.clone(),
            set_identifier: r.set_identifier.clone(),
            weight: r.weight,
            region: r.region.clone(),
            geo_location: r.geo_location.as_ref().map(|g| XmlGeoLocation {
                continent_code: g.continent_code.clone(),
                country_code: g.country_code.clone(),
                subdivision_code: g.subdivision_code.clone(),
            }),
            failover: r.failover.clone(),
            multi_value_answer: r.multi_value_answer,
            ttl: r.ttl,
            // 别名记录不能携带空的 ResourceRecords 元素
            resource_records: (!r.resource_records.is_empty()).then(|| XmlResourceRecords {
                items: r
                    .resource_records
                    .iter()
                    .map(|value| XmlResourceRecord {
                        value: value.clone(),
                    })
                    .collect(),
            }),
            alias_target: r.alias_target.as_ref().map(|a| XmlAliasTarget {
                hosted_zone_id: a.hosted_zone_id.clone(),
                dns_name: a.dns_name.clone(),
                evaluate_target_health: a.evaluate_target_health,
            }),
            health_check_id: r.health_check_id.clone(),
            traffic_policy_instance_id: r.traffic_policy_instance_id.clone(),
            cidr_routing_config: r.cidr_routing_config.as_ref().map(|c| XmlCidrRoutingConfig {
                collection_id: c.collection_id.clone(),
                location_name: c.location_name.clone(),
            }),
            geo_proximity_location: r.geo_proximity_location.as_ref().map(|g| {
                XmlGeoProximityLocation {
                    aws_region: g.aws_region.clone(),
                    local_zone_group: g.local_zone_group.clone(),
                    coordinates: g.latitude.clone().zip(g.longitude.clone()).map(
                        |(latitude, longitude)| XmlCoordinates {
                            latitude,
                            longitude,
                        },
                    ),
                    bias: g.bias,
                }
            }),
        }
    }
}

// ============ ChangeResourceRecordSets ============

#[derive(Debug, Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub(crate) struct ChangeResourceRecordSetsRequest {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: XmlChangeBatch,
}

impl ChangeResourceRecordSetsRequest {
    pub fn new(changes: &[Change], comment: Option<&str>) -> Self {
        Self {
            xmlns: ROUTE53_XMLNS,
            change_batch: XmlChangeBatch {
                comment: comment.map(str::to_string),
                changes: XmlChanges {
                    items: changes
                        .iter()
                        .map(|c| XmlChange {
                            action: c.action.as_str(),
                            resource_record_set: XmlRecordSet::from(&c.record_set),
                        })
                        .collect(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct XmlChangeBatch {
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "Changes")]
    pub changes: XmlChanges,
}

#[derive(Debug, Serialize)]
pub(crate) struct XmlChanges {
    #[serde(rename = "Change")]
    pub items: Vec<XmlChange>,
}

#[derive(Debug, Serialize)]
pub(crate) struct XmlChange {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    pub resource_record_set: XmlRecordSet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeResourceRecordSetsResponse {
    #[serde(rename = "ChangeInfo")]
    pub change_info: XmlChangeInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlChangeInfo {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "SubmittedAt")]
    pub submitted_at: Option<String>,
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
}

impl From<XmlChangeInfo> for ChangeInfo {
    fn from(x: XmlChangeInfo) -> Self {
        Self {
            id: x.id,
            status: x.status,
            submitted_at: x
                .submitted_at
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            comment: x.comment,
        }
    }
}

// ============ 错误响应 ============

/// Generic error body (`<ErrorResponse><Error>...</Error></ErrorResponse>`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: XmlError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

/// Body returned when a change batch is rejected (`<InvalidChangeBatch>`).
#[derive(Debug, Deserialize)]
pub(crate) struct InvalidChangeBatchResponse {
    #[serde(rename = "Messages", default)]
    pub messages: XmlMessages,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct XmlMessages {
    #[serde(rename = "Message", default)]
    pub items: Vec<String>,
}
