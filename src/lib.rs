pub mod azure;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

use azure::AzureProvider;
use models::SqlServerRef;
use processing::{
    deprecation_stamp, AppServiceRef, ApplyOptions, ApplySummary, LockAuditSummary, ReconcilePlan,
};
use std::error::Error;

/// Add a `CanNotDelete` lock to every unlocked resource group of every subscription.
pub fn lock_audit(
    provider: &impl AzureProvider,
    dry_run: bool,
) -> Result<LockAuditSummary, Box<dyn Error>> {
    log::info!("#Start lock_audit() dry_run={dry_run}");
    let summary = processing::audit_locks(provider, dry_run)?;
    output::print_lock_summary(&summary);
    Ok(summary)
}

/// Reconcile the SQL server firewall with the App Service outbound IPs.
pub fn sql_firewall(
    provider: &impl AzureProvider,
    server: &SqlServerRef,
    app: &AppServiceRef,
    remove_conflicts: bool,
    dry_run: bool,
) -> Result<(ReconcilePlan, ApplySummary), Box<dyn Error>> {
    log::info!("#Start sql_firewall() server={server} app={app} remove_conflicts={remove_conflicts} dry_run={dry_run}");
    let options = ApplyOptions {
        remove_conflicts,
        dry_run,
        deprecation_stamp: deprecation_stamp(&chrono::Local::now()),
    };
    let (plan, summary) = processing::reconcile_firewall(provider, server, app, &options)?;
    if !dry_run {
        output::print_apply_summary(&summary);
    }
    Ok((plan, summary))
}
