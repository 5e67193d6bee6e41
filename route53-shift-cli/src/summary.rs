//! 运行报告的文本摘要

use std::fmt::Write;

use route53_shift_core::types::{BatchResult, RunReport, TargetReport};

/// Render a run report for a terminal.
pub fn render(report: &RunReport) -> String {
    let mut out = String::new();
    let elapsed = report.finished_at - report.started_at;

    let _ = writeln!(
        out,
        "Run {} in {}ms{}",
        if report.is_success() { "succeeded" } else { "FAILED" },
        elapsed.num_milliseconds(),
        if report.dry_run { " (dry run)" } else { "" }
    );

    for zone in &report.zones {
        let _ = writeln!(
            out,
            "Zone {}: {} record sets fetched",
            zone.zone_id, zone.records_fetched
        );
        if let Some(error) = &zone.error {
            let _ = writeln!(out, "  error: {error}");
        }
        for target in &zone.targets {
            render_target(&mut out, target, report.dry_run);
        }
    }

    let _ = writeln!(
        out,
        "Total: {} record sets, {} changes, {} batches ({} failed)",
        report.total_records_fetched(),
        report.total_changes_found(),
        report.total_batches(),
        report.failed_batches()
    );
    if let Some(error) = &report.aborted {
        let _ = writeln!(out, "Aborted: {error}");
    }
    out
}

fn render_target(out: &mut String, target: &TargetReport, dry_run: bool) {
    let _ = writeln!(
        out,
        "  {}: {} changes",
        target.target, target.changes_found
    );
    if let Some(error) = &target.error {
        let _ = writeln!(out, "    error: {error}");
    }

    if dry_run {
        for change in &target.changes {
            let record = &change.record_set;
            let _ = write!(
                out,
                "    {} {} {}",
                change.action.as_str(),
                record.name,
                record.record_type
            );
            if let Some(id) = &record.set_identifier {
                let _ = write!(out, " [{id}]");
            }
            if let Some(alias) = &record.alias_target {
                let _ = write!(out, " -> {}", alias.dns_name);
            }
            if let Some(weight) = record.weight {
                let _ = write!(out, " weight={weight}");
            }
            out.push('\n');
        }
    }

    for batch in &target.batches {
        match batch {
            BatchResult::Success {
                batch_index,
                change_count,
                change_id,
                status,
            } => {
                let _ = writeln!(
                    out,
                    "    batch {batch_index}: {change_count} changes, {change_id} ({status})"
                );
            }
            BatchResult::Failure {
                batch_index,
                change_count,
                error,
            } => {
                let _ = writeln!(
                    out,
                    "    batch {batch_index}: {change_count} changes FAILED: {error}"
                );
            }
        }
    }
}
