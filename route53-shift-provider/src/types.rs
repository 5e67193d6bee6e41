use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Record Sets ============

/// A single resource record set as held by the control plane.
///
/// Every field the control plane returns is kept, because an UPSERT replaces the
/// whole record set: anything dropped here would be deleted remotely. Values are
/// treated as immutable once fetched; policies that change a record build a new
/// value with [`Clone`] and edit the copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    /// Fully-qualified name, with or without a trailing dot.
    pub name: String,
    /// Record type, e.g. `A`, `AAAA`, `CNAME`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Distinguishes record sets sharing name and type under a routing policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    /// Weighted-routing weight. Present only on weighted records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    /// Latency-routing region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Geolocation-routing location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
    /// Failover role, `PRIMARY` or `SECONDARY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover: Option<String>,
    /// Multivalue-answer routing flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_answer: Option<bool>,
    /// Time to live in seconds. Absent on alias records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Literal record values, in control-plane order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_records: Vec<String>,
    /// Alias target, for records that point at another named endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_policy_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_routing_config: Option<CidrRoutingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_proximity_location: Option<GeoProximityLocation>,
}

impl RecordSet {
    /// Create a plain record set with only name and type set.
    pub fn new(name: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            set_identifier: None,
            weight: None,
            region: None,
            geo_location: None,
            failover: None,
            multi_value_answer: None,
            ttl: None,
            resource_records: Vec::new(),
            alias_target: None,
            health_check_id: None,
            traffic_policy_instance_id: None,
            cidr_routing_config: None,
            geo_proximity_location: None,
        }
    }

    /// Whether the record set participates in weighted routing.
    pub fn is_weighted(&self) -> bool {
        self.weight.is_some()
    }
}

/// Target of an alias record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasTarget {
    /// Hosted zone of the target endpoint (not of the record itself).
    pub hosted_zone_id: String,
    /// DNS name of the target endpoint.
    pub dns_name: String,
    pub evaluate_target_health: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdivision_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CidrRoutingConfig {
    pub collection_id: String,
    pub location_name: String,
}

/// Geoproximity-routing location. Coordinates are kept as the decimal strings
/// the control plane returns so they are resent without float rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoProximityLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_zone_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<i64>,
}

// ============ Changes ============

/// Action carried by a [`Change`].
///
/// Only `UPSERT` is modelled: this workspace never creates or deletes record sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record set if absent, replace it entirely if present.
    Upsert,
}

impl ChangeAction {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upsert => "UPSERT",
        }
    }
}

/// A single change request: an action paired with a complete record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub action: ChangeAction,
    pub record_set: RecordSet,
}

impl Change {
    /// Build an UPSERT change for the given record set.
    pub fn upsert(record_set: RecordSet) -> Self {
        Self {
            action: ChangeAction::Upsert,
            record_set,
        }
    }
}

/// Status of a submitted change batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// Change ID assigned by the control plane, e.g. `/change/C2682N5HXP0BZ4`.
    pub id: String,
    /// `PENDING` or `INSYNC`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ============ Pagination ============

/// Continuation token for record listing.
///
/// The control plane pages record sets by position rather than by page number;
/// the cursor names the first record of the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCursor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// One page of record sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    /// Record sets in this page, in control-plane order.
    pub records: Vec<RecordSet>,
    /// Cursor for the next page; `None` when this is the last page.
    pub next: Option<RecordCursor>,
}

impl RecordPage {
    /// A final page with no continuation.
    pub fn last(records: Vec<RecordSet>) -> Self {
        Self {
            records,
            next: None,
        }
    }

    /// Whether there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

// ============ Control Plane ============

/// Request-size limits of a control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneLimits {
    /// Maximum number of changes accepted in one change batch.
    pub max_changes_per_batch: usize,
    /// Maximum number of record sets returned per listing page.
    pub max_page_size: u32,
}

/// AWS signing credentials.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Session token for temporary (STS) credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Environment variable holding the access key ID.
    pub const ENV_ACCESS_KEY_ID: &'static str = "AWS_ACCESS_KEY_ID";
    /// Environment variable holding the secret access key.
    pub const ENV_SECRET_ACCESS_KEY: &'static str = "AWS_SECRET_ACCESS_KEY";
    /// Environment variable holding the optional session token.
    pub const ENV_SESSION_TOKEN: &'static str = "AWS_SESSION_TOKEN";

    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Read credentials from the standard AWS environment variables.
    ///
    /// Returns `None` when the key ID or secret is missing or empty.
    pub fn from_env() -> Option<Self> {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let access_key_id = non_empty(Self::ENV_ACCESS_KEY_ID)?;
        let secret_access_key = non_empty(Self::ENV_SECRET_ACCESS_KEY)?;
        Some(Self {
            access_key_id,
            secret_access_key,
            session_token: non_empty(Self::ENV_SESSION_TOKEN),
        })
    }
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "***"),
            )
            .finish()
    }
}
