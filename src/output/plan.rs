//! Human readable firewall plan and run summaries.

use super::terminal::{action_label, format_field};
use crate::models::{FirewallRule, SqlServerRef, TargetIp};
use crate::processing::{ApplySummary, LockAuditSummary, ReconcilePlan};
use colored::Colorize;

/// Render the plan as lines, one per target and one per action.
pub fn plan_lines(targets: &[TargetIp], plan: &ReconcilePlan, remove_conflicts: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for t in targets {
        lines.push(format!(
            "  #{pos:02} {ip} {name}",
            pos = t.position,
            ip = format_field(&t.ip, 18),
            name = t.canonical_name,
        ));
    }

    let conflict_action = if remove_conflicts { "REMOVE" } else { "DEPRECATE" };
    let mut push = |action: &str, rule: &FirewallRule| {
        lines.push(format!("  {:<9} {rule}", action_label(action)));
    };
    for rule in &plan.to_deprecate {
        push(conflict_action, rule);
    }
    for rule in &plan.to_add {
        push("ADD", rule);
    }
    for rule in &plan.to_remove {
        push("REMOVE", rule);
    }

    lines
}

/// Print the plan for `server` to stdout.
pub fn print_plan(
    server: &SqlServerRef,
    targets: &[TargetIp],
    plan: &ReconcilePlan,
    remove_conflicts: bool,
) {
    println!(
        "SQL server '{}': {} target IPs, {} actions",
        server.to_string().bold(),
        targets.len(),
        plan.len()
    );
    for line in plan_lines(targets, plan, remove_conflicts) {
        println!("{line}");
    }
    if plan.is_empty() {
        println!("  {}", "firewall already matches outbound IPs".green());
    }
}

pub fn print_apply_summary(summary: &ApplySummary) {
    println!(
        "Applied: {} created, {} deprecated, {} conflicts removed, {} removed, {} skipped",
        summary.created,
        summary.deprecated,
        summary.conflicts_removed,
        summary.removed,
        summary.skipped
    );
}

pub fn print_lock_summary(summary: &LockAuditSummary) {
    println!(
        "Checked {} resource groups in {} subscriptions: {} already locked, {} locks created",
        summary.groups, summary.subscriptions, summary.already_locked, summary.created
    );
}
