//! 迁移计划类型

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest weight Route 53 accepts on a weighted record.
pub const MAX_WEIGHT: i64 = 255;

/// An `(old, new)` endpoint pair: alias targets pointing at `old` move to `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPair {
    pub old: String,
    pub new: String,
}

impl EndpointPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        require_dns_name("old endpoint", &self.old)?;
        require_dns_name("new endpoint", &self.new)
    }
}

/// Repoint work for one zone: pairs are applied in order against one record snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMigrationSpec {
    pub zone_id: String,
    pub pairs: Vec<EndpointPair>,
}

/// Weight work for one zone: every weighted alias pointing at `target` gets `weight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightAdjustmentSpec {
    pub zone_id: String,
    pub target: String,
    /// Signed so that a negative value from configuration reaches validation
    /// instead of failing to parse.
    pub weight: i64,
}

/// One configured unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum WorkItem {
    Repoint(EndpointMigrationSpec),
    Weight(WeightAdjustmentSpec),
}

impl WorkItem {
    pub fn zone_id(&self) -> &str {
        match self {
            Self::Repoint(spec) => &spec.zone_id,
            Self::Weight(spec) => &spec.zone_id,
        }
    }

    /// Targets of this work item, in configured order.
    pub fn targets(&self) -> Vec<Target> {
        match self {
            Self::Repoint(spec) => spec.pairs.iter().cloned().map(Target::Repoint).collect(),
            Self::Weight(spec) => vec![Target::Weight {
                target: spec.target.clone(),
                weight: spec.weight,
            }],
        }
    }
}

/// A single builder invocation: one endpoint pair or one weight target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "camelCase")]
pub enum Target {
    Repoint(EndpointPair),
    Weight { target: String, weight: i64 },
}

impl Target {
    /// Input checks that must pass before any control-plane call.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            Self::Repoint(pair) => pair.validate(),
            Self::Weight { target, weight } => {
                require_dns_name("target endpoint", target)?;
                validate_weight(*weight).map(|_| ())
            }
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repoint(pair) => write!(f, "{} -> {}", pair.old, pair.new),
            Self::Weight { target, weight } => write!(f, "{target} weight={weight}"),
        }
    }
}

/// Check a weight and convert it to the control plane's unsigned form.
pub fn validate_weight(weight: i64) -> CoreResult<u64> {
    if !(0..=MAX_WEIGHT).contains(&weight) {
        return Err(CoreError::InvalidArgument(format!(
            "weight must be between 0 and {MAX_WEIGHT}, got {weight}"
        )));
    }
    u64::try_from(weight).map_err(|e| CoreError::InvalidArgument(e.to_string()))
}

fn require_dns_name(what: &str, name: &str) -> CoreResult<()> {
    if name.trim_end_matches('.').trim().is_empty() {
        return Err(CoreError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}
