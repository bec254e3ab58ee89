//! Guardrail processing logic.
//!
//! - [`locks`] - Resource group delete-lock audit
//! - [`firewall`] - Classification of SQL firewall rules against outbound IPs
//! - [`deprecate`] - Names for deprecated firewall rules
//! - [`reconcile`] - Fetch, plan and apply for the SQL firewall

mod deprecate;
mod firewall;
mod locks;
mod reconcile;

// Re-export public functions
pub use deprecate::{deprecated_rule_name, deprecation_stamp};
pub use firewall::{
    canonical_rule_name, classify, classify_targets, split_outbound_ips, tag_rule, target_ips,
    IpState, ReconcilePlan, RuleTag,
};
pub use locks::{audit_locks, lock_decision, lock_spec_for, LockAuditSummary, LockDecision};
pub use reconcile::{
    apply_plan, fetch_snapshot, reconcile_firewall, AppServiceRef, ApplyOptions, ApplySummary,
    FirewallSnapshot,
};
