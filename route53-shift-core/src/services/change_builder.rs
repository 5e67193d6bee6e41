//! 变更构建：按策略扫描记录并生成 UPSERT 变更
//!
//! 两个策略都是纯函数：不做 I/O，不修改输入，只对命中的记录克隆后改写。

use route53_shift_provider::{Change, RecordSet};

use crate::error::CoreResult;
use crate::types::validate_weight;
use crate::utils::{dns_names_equal, normalize_dns_name};

/// Repoint every alias record targeting `old_dns` to `new_dns`.
///
/// Only `aliasTarget.dnsName` is compared; plain `resourceRecords` values are
/// never matched. The emitted record differs from the source only in its
/// alias target DNS name, which is written in normalized form.
pub fn build_repoint_changes(records: &[RecordSet], old_dns: &str, new_dns: &str) -> Vec<Change> {
    let new_dns = normalize_dns_name(new_dns);

    records
        .iter()
        .filter(|record| {
            record
                .alias_target
                .as_ref()
                .is_some_and(|alias| dns_names_equal(&alias.dns_name, old_dns))
        })
        .map(|record| {
            let mut updated = record.clone();
            if let Some(alias) = updated.alias_target.as_mut() {
                alias.dns_name.clone_from(&new_dns);
            }
            log::debug!(
                "Repoint {} {} ({}) -> {new_dns}",
                record.name,
                record.record_type,
                record.set_identifier.as_deref().unwrap_or("-")
            );
            Change::upsert(updated)
        })
        .collect()
}

/// Set the weight of every weighted alias record targeting `target_dns`.
///
/// A record qualifies only when it carries both an alias target and a weight.
/// Fails with `InvalidArgument` for weights outside `0..=255` before looking
/// at any record.
pub fn build_weight_changes(
    records: &[RecordSet],
    target_dns: &str,
    new_weight: i64,
) -> CoreResult<Vec<Change>> {
    let weight = validate_weight(new_weight)?;

    Ok(records
        .iter()
        .filter(|record| record.is_weighted())
        .filter(|record| {
            record
                .alias_target
                .as_ref()
                .is_some_and(|alias| dns_names_equal(&alias.dns_name, target_dns))
        })
        .map(|record| {
            log::debug!(
                "Weight {} {} ({}): {:?} -> {weight}",
                record.name,
                record.record_type,
                record.set_identifier.as_deref().unwrap_or("-"),
                record.weight
            );
            Change::upsert(RecordSet {
                weight: Some(weight),
                ..record.clone()
            })
        })
        .collect())
}
