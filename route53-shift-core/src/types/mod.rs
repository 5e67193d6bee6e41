//! 类型定义模块

mod plan;
mod report;

pub use plan::{
    EndpointMigrationSpec, EndpointPair, MAX_WEIGHT, Target, WeightAdjustmentSpec, WorkItem,
    validate_weight,
};
pub use report::{BatchResult, RunReport, TargetReport, ZoneReport};

// Re-export provider 库的公共类型
pub use route53_shift_provider::{
    AliasTarget, Change, ChangeAction, ChangeInfo, ControlPlaneLimits, RecordSet,
};
