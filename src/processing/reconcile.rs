//! SQL firewall reconciliation against an App Service's outbound addresses.
//!
//! Fetch phase reads the live rules and addresses, [`classify`] builds the
//! plan, and [`apply_plan`] executes it in a fixed order: conflicts first,
//! then creations, then redundant removals.

use super::deprecate::deprecated_rule_name;
use super::firewall::{classify, target_ips, ReconcilePlan};
use crate::azure::AzureProvider;
use crate::models::{FirewallRule, SqlServerRef, TargetIp};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

/// Identifies the App Service whose outbound addresses are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppServiceRef {
    pub subscription: Option<String>,
    pub resource_group: String,
    pub name: String,
}

impl fmt::Display for AppServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_group, self.name)
    }
}

/// How the plan is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Delete conflicting rules instead of deprecating them.
    pub remove_conflicts: bool,
    /// Print the plan only.
    pub dry_run: bool,
    /// Timestamp for `DEP<stamp>-` names, see [`super::deprecation_stamp`].
    pub deprecation_stamp: String,
}

/// Counters of applied provider writes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    /// Conflicting rules recreated under a `DEP` name.
    pub deprecated: usize,
    /// Conflicting rules deleted outright.
    pub conflicts_removed: usize,
    pub created: usize,
    pub removed: usize,
    /// Deletes skipped because the name was already handled this run.
    pub skipped: usize,
}

/// Live state read from the provider before classification.
#[derive(Debug, Clone)]
pub struct FirewallSnapshot {
    pub plan_name: String,
    pub rules: Vec<FirewallRule>,
    pub targets: Vec<TargetIp>,
}

/// Read the firewall rules, the App Service addresses and its plan name.
pub fn fetch_snapshot(
    provider: &impl AzureProvider,
    server: &SqlServerRef,
    app: &AppServiceRef,
) -> Result<FirewallSnapshot, Box<dyn Error>> {
    let rules = provider.list_firewall_rules(server)?;
    log::info!("SQL server '{server}' has {} firewall rules", rules.len());

    let web_app =
        provider.show_web_app(app.subscription.as_deref(), &app.resource_group, &app.name)?;
    let plan_id = web_app
        .server_farm_id
        .as_deref()
        .ok_or_else(|| format!("App Service '{app}' has no App Service Plan"))?;
    let plan = provider.show_resource_by_id(plan_id)?;
    let outbound = web_app.outbound_ip_addresses.unwrap_or_default();
    log::info!(
        "App Service '{app}' on plan '{}' outbound IPs: {outbound}",
        plan.name
    );

    let targets = target_ips(&plan.name, &web_app.name, &outbound);
    Ok(FirewallSnapshot {
        plan_name: plan.name,
        rules,
        targets,
    })
}

/// Execute `plan` against `server`. Stops at the first provider error.
pub fn apply_plan(
    provider: &impl AzureProvider,
    server: &SqlServerRef,
    plan: &ReconcilePlan,
    options: &ApplyOptions,
) -> Result<ApplySummary, Box<dyn Error>> {
    let mut summary = ApplySummary::default();
    if options.dry_run {
        log::info!("Dry run, {} actions not applied", plan.len());
        return Ok(summary);
    }

    // Names already deleted or written in this run.
    let mut touched: HashSet<String> = HashSet::new();

    for rule in &plan.to_deprecate {
        if touched.contains(&rule.name) {
            log::warn!("Skip conflict '{}', already handled", rule.name);
            summary.skipped += 1;
            continue;
        }
        if options.remove_conflicts {
            log::warn!("Removing conflicting rule {rule}");
            provider.delete_firewall_rule(server, &rule.name)?;
            summary.conflicts_removed += 1;
        } else {
            let deprecated =
                rule.renamed(deprecated_rule_name(&options.deprecation_stamp, &rule.name));
            log::warn!("Deprecating rule {rule} as '{}'", deprecated.name);
            provider.create_firewall_rule(server, &deprecated)?;
            provider.delete_firewall_rule(server, &rule.name)?;
            touched.insert(deprecated.name);
            summary.deprecated += 1;
        }
        touched.insert(rule.name.clone());
    }

    for rule in &plan.to_add {
        log::warn!("Creating rule {rule}");
        provider.create_firewall_rule(server, rule)?;
        touched.insert(rule.name.clone());
        summary.created += 1;
    }

    for rule in &plan.to_remove {
        if touched.contains(&rule.name) {
            log::warn!("Skip removal of '{}', already handled", rule.name);
            summary.skipped += 1;
            continue;
        }
        log::warn!("Removing redundant rule {rule}");
        provider.delete_firewall_rule(server, &rule.name)?;
        touched.insert(rule.name.clone());
        summary.removed += 1;
    }

    Ok(summary)
}

/// Fetch, classify and apply in one pass.
pub fn reconcile_firewall(
    provider: &impl AzureProvider,
    server: &SqlServerRef,
    app: &AppServiceRef,
    options: &ApplyOptions,
) -> Result<(ReconcilePlan, ApplySummary), Box<dyn Error>> {
    let snapshot = fetch_snapshot(provider, server, app)?;
    let plan = classify(&snapshot.rules, &snapshot.targets);
    crate::output::print_plan(server, &snapshot.targets, &plan, options.remove_conflicts);
    let summary = apply_plan(provider, server, &plan, options)?;
    Ok((plan, summary))
}
