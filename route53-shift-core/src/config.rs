//! 运行配置：TOML / JSON 文件，以及旧版 `{zone: [[old, new]]}` 映射

use std::path::Path;

use route53_shift_provider::ControlPlaneLimits;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::services::{DEFAULT_BATCH_SIZE, DEFAULT_PAGE_SIZE, RunOptions};
use crate::types::{EndpointMigrationSpec, EndpointPair, WeightAdjustmentSpec, WorkItem};

/// Run configuration.
///
/// ```toml
/// batch_size = 100
/// comment = "retire old-nlb"
///
/// [[zones]]
/// zone_id = "Z0123456789ABC"
/// mode = "repoint"
/// pairs = [{ old = "old-nlb.elb.amazonaws.com", new = "new-nlb.elb.amazonaws.com" }]
///
/// [[zones]]
/// zone_id = "Z0123456789ABC"
/// mode = "weight"
/// target = "old-nlb.elb.amazonaws.com"
/// weight = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default = "default_max_concurrent_batches")]
    pub max_concurrent_batches: usize,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

/// One `[[zones]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase", deny_unknown_fields)]
pub enum ZoneConfig {
    Repoint {
        zone_id: String,
        pairs: Vec<EndpointPair>,
    },
    Weight {
        zone_id: String,
        target: String,
        weight: i64,
    },
}

/// Legacy mapping: zone ID to `[old, new]` pairs, zones kept in file order.
struct LegacyMapping(Vec<(String, Vec<(String, String)>)>);

impl<'de> Deserialize<'de> for LegacyMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = LegacyMapping;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of zone id to [old, new] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut zones: Vec<(String, Vec<(String, String)>)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    zones.push(entry);
                }
                Ok(LegacyMapping(zones))
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_concurrent_batches() -> usize {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
            comment: None,
            max_concurrent_batches: default_max_concurrent_batches(),
            page_size: DEFAULT_PAGE_SIZE,
            zones: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Load from a file; `.toml` is parsed as TOML, anything else as JSON.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;

        log::debug!(
            "Loaded config from {}: {} zone entries",
            path.display(),
            config.zones.len()
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Parse JSON in either the structured form or the legacy zone mapping.
    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        let structured_err = match serde_json::from_str::<Self>(content) {
            Ok(config) => return Ok(config),
            Err(e) => e,
        };

        match serde_json::from_str::<LegacyMapping>(content) {
            Ok(mapping) => {
                log::debug!("Parsed legacy zone mapping with {} zones", mapping.0.len());
                Ok(Self::from_legacy(mapping))
            }
            Err(_) => Err(CoreError::Config(structured_err.to_string())),
        }
    }

    fn from_legacy(mapping: LegacyMapping) -> Self {
        Self {
            zones: mapping
                .0
                .into_iter()
                .map(|(zone_id, pairs)| ZoneConfig::Repoint {
                    zone_id,
                    pairs: pairs
                        .into_iter()
                        .map(|(old, new)| EndpointPair { old, new })
                        .collect(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Check the run-level settings before any control-plane call is made.
    ///
    /// Work items are not checked here: an invalid item only fails itself and
    /// is reported by the coordinator. See [`item_errors`](Self::item_errors).
    pub fn validate(&self, limits: ControlPlaneLimits) -> CoreResult<()> {
        if self.batch_size == 0 || self.batch_size > limits.max_changes_per_batch {
            return Err(CoreError::InvalidArgument(format!(
                "batch_size must be between 1 and {}, got {}",
                limits.max_changes_per_batch, self.batch_size
            )));
        }
        if self.max_concurrent_batches == 0 {
            return Err(CoreError::InvalidArgument(
                "max_concurrent_batches must be at least 1".into(),
            ));
        }
        if self.page_size == 0 || self.page_size > limits.max_page_size {
            return Err(CoreError::InvalidArgument(format!(
                "page_size must be between 1 and {}, got {}",
                limits.max_page_size, self.page_size
            )));
        }
        if self.zones.is_empty() {
            return Err(CoreError::InvalidArgument("no zones configured".into()));
        }
        Ok(())
    }

    /// Problems with individual work items, prefixed with their `zones[i]` position.
    pub fn item_errors(&self) -> Vec<CoreError> {
        let mut errors = Vec::new();
        for (i, item) in self.work_items().iter().enumerate() {
            let at = |msg: String| {
                CoreError::InvalidArgument(format!("zones[{i}] ({}): {msg}", item.zone_id()))
            };
            if item.zone_id().trim().is_empty() {
                errors.push(at("zone_id must not be empty".into()));
                continue;
            }
            if let WorkItem::Repoint(spec) = item
                && spec.pairs.is_empty()
            {
                errors.push(at("at least one endpoint pair is required".into()));
            }
            errors.extend(item.targets().iter().filter_map(|t| match t.validate() {
                Err(CoreError::InvalidArgument(msg)) => Some(at(msg)),
                Err(other) => Some(other),
                Ok(()) => None,
            }));
        }
        errors
    }

    /// Work items in configured order.
    pub fn work_items(&self) -> Vec<WorkItem> {
        self.zones
            .iter()
            .map(|zone| match zone {
                ZoneConfig::Repoint { zone_id, pairs } => {
                    WorkItem::Repoint(EndpointMigrationSpec {
                        zone_id: zone_id.clone(),
                        pairs: pairs.clone(),
                    })
                }
                ZoneConfig::Weight {
                    zone_id,
                    target,
                    weight,
                } => WorkItem::Weight(WeightAdjustmentSpec {
                    zone_id: zone_id.clone(),
                    target: target.clone(),
                    weight: *weight,
                }),
            })
            .collect()
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            batch_size: self.batch_size,
            dry_run: self.dry_run,
            comment: self.comment.clone(),
            max_concurrent_batches: self.max_concurrent_batches,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RunCoordinator;
    use crate::test_utils::{MockControlPlane, alias_record};
    use route53_shift_provider::DnsControlPlane;
    use std::io::Write;
    use std::sync::Arc;

    const LIMITS: ControlPlaneLimits = ControlPlaneLimits {
        max_changes_per_batch: 1000,
        max_page_size: 300,
    };

    const TOML_CONFIG: &str = r#"
batch_size = 50
comment = "retire old-nlb"

[[zones]]
zone_id = "Z1"
mode = "repoint"
pairs = [
    { old = "old-a.elb.amazonaws.com", new = "new-a.elb.amazonaws.com" },
    { old = "old-b.elb.amazonaws.com", new = "new-b.elb.amazonaws.com" },
]

[[zones]]
zone_id = "Z2"
mode = "weight"
target = "old-a.elb.amazonaws.com"
weight = 0
"#;

    #[test]
    fn toml_structured() {
        let config = RunConfig::from_toml_str(TOML_CONFIG).unwrap();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.page_size, 300);
        assert_eq!(config.max_concurrent_batches, 1);
        assert!(!config.dry_run);
        assert_eq!(config.comment.as_deref(), Some("retire old-nlb"));
        config.validate(LIMITS).unwrap();

        let items = config.work_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].targets().len(), 2);
        assert!(matches!(
            &items[1],
            WorkItem::Weight(WeightAdjustmentSpec { weight: 0, .. })
        ));
    }

    #[test]
    fn json_structured() {
        let json = r#"{
            "dry_run": true,
            "zones": [{"zone_id": "Z1", "mode": "weight", "target": "nlb.example.com", "weight": 10}]
        }"#;
        let config = RunConfig::from_json_str(json).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.batch_size, 100);
        assert!(config.run_options().dry_run);
    }

    #[test]
    fn json_legacy_mapping() {
        let json = r#"{
            "Z9": [["old-a.elb.amazonaws.com", "new-a.elb.amazonaws.com"]],
            "Z2": [["old-b.elb.amazonaws.com", "new-b.elb.amazonaws.com"],
                   ["old-c.elb.amazonaws.com", "new-c.elb.amazonaws.com"]]
        }"#;
        let config = RunConfig::from_json_str(json).unwrap();
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.zones.len(), 2);
        // 保持文件中的区域顺序
        assert!(matches!(&config.zones[0], ZoneConfig::Repoint { zone_id, .. } if zone_id == "Z9"));
        assert_eq!(
            config.zones[1],
            ZoneConfig::Repoint {
                zone_id: "Z2".into(),
                pairs: vec![
                    EndpointPair::new("old-b.elb.amazonaws.com", "new-b.elb.amazonaws.com"),
                    EndpointPair::new("old-c.elb.amazonaws.com", "new-c.elb.amazonaws.com"),
                ],
            }
        );
        config.validate(LIMITS).unwrap();
    }

    #[test]
    fn json_garbage_is_config_error() {
        assert!(matches!(
            RunConfig::from_json_str("{\"zones\": 5}"),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn unknown_mode_rejected() {
        let toml = "[[zones]]\nzone_id = \"Z1\"\nmode = \"delete\"\n";
        assert!(matches!(
            RunConfig::from_toml_str(toml),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn invalid_item_does_not_fail_validate() {
        let toml = r#"
[[zones]]
zone_id = "Z1"
mode = "repoint"
pairs = [{ old = "old-nlb.elb.amazonaws.com", new = "new-nlb.elb.amazonaws.com" }]

[[zones]]
zone_id = "Z2"
mode = "weight"
target = "old-nlb.elb.amazonaws.com"
weight = -1
"#;
        let config = RunConfig::from_toml_str(toml).unwrap();
        config.validate(LIMITS).unwrap();

        let errors = config.item_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], CoreError::InvalidArgument(msg) if msg.starts_with("zones[1] (Z2)")));
    }

    #[tokio::test]
    async fn valid_item_runs_beside_invalid_sibling() {
        let toml = r#"
[[zones]]
zone_id = "Z1"
mode = "repoint"
pairs = [{ old = "old-nlb.elb.amazonaws.com", new = "new-nlb.elb.amazonaws.com" }]

[[zones]]
zone_id = "Z2"
mode = "weight"
target = "old-nlb.elb.amazonaws.com"
weight = -1
"#;
        let config = RunConfig::from_toml_str(toml).unwrap();
        let mock = Arc::new(
            MockControlPlane::new()
                .with_zone("Z1", vec![alias_record("a.example.com.", "old-nlb.elb.amazonaws.com.")])
                .with_zone("Z2", Vec::new()),
        );
        config.validate(mock.limits()).unwrap();

        let coordinator = RunCoordinator::new(mock.clone(), config.run_options()).unwrap();
        let report = coordinator.run(&config.work_items()).await;

        assert!(report.zones[0].is_success());
        assert_eq!(report.zones[0].targets[0].batches.len(), 1);
        assert!(matches!(
            report.zones[1].targets[0].error,
            Some(CoreError::InvalidArgument(_))
        ));
        assert!(report.aborted.is_none());
        assert_eq!(mock.list_calls(), 1);
        assert_eq!(mock.apply_calls(), 1);
    }

    #[test]
    fn validate_rejects_bad_run_settings() {
        let base = RunConfig::from_toml_str(TOML_CONFIG).unwrap();

        for bad in [
            RunConfig {
                batch_size: 0,
                ..base.clone()
            },
            RunConfig {
                batch_size: 1001,
                ..base.clone()
            },
            RunConfig {
                max_concurrent_batches: 0,
                ..base.clone()
            },
            RunConfig {
                page_size: 301,
                ..base.clone()
            },
            RunConfig {
                zones: Vec::new(),
                ..base.clone()
            },
        ] {
            assert!(
                matches!(bad.validate(LIMITS), Err(CoreError::InvalidArgument(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn item_errors_cover_each_bad_item() {
        let config = RunConfig {
            zones: vec![
                ZoneConfig::Repoint {
                    zone_id: "Z1".into(),
                    pairs: Vec::new(),
                },
                ZoneConfig::Repoint {
                    zone_id: " ".into(),
                    pairs: vec![EndpointPair::new("a", "b")],
                },
                ZoneConfig::Repoint {
                    zone_id: "Z3".into(),
                    pairs: vec![EndpointPair::new("a", ""), EndpointPair::new("c", "d")],
                },
                ZoneConfig::Weight {
                    zone_id: "Z4".into(),
                    target: "lb.example.com".into(),
                    weight: 10,
                },
            ],
            ..RunConfig::default()
        };
        config.validate(LIMITS).unwrap();

        let errors: Vec<String> = config.item_errors().iter().map(ToString::to_string).collect();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors[0].contains("zones[0]"));
        assert!(errors[1].contains("zones[1]"));
        assert!(errors[2].contains("zones[2]"));
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("plan.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(TOML_CONFIG.as_bytes())
            .unwrap();
        assert_eq!(RunConfig::load(&toml_path).unwrap().batch_size, 50);

        let json_path = dir.path().join("hosted_zones.json");
        std::fs::write(&json_path, r#"{"Z1": [["a.example.com", "b.example.com"]]}"#).unwrap();
        assert_eq!(RunConfig::load(&json_path).unwrap().zones.len(), 1);
    }

    #[test]
    fn load_missing_file() {
        let result = RunConfig::load(Path::new("/nonexistent/route53-shift.toml"));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
