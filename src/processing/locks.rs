//! Resource group delete-lock audit.

use crate::azure::AzureProvider;
use crate::config;
use crate::models::{LockSpec, ManagementLock, ResourceGroup};
use colored::Colorize;
use std::error::Error;

/// Outcome of checking one resource group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockDecision {
    AlreadyLocked,
    Create(LockSpec),
}

/// Counters reported at the end of a `lock-audit` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LockAuditSummary {
    pub subscriptions: usize,
    pub groups: usize,
    pub already_locked: usize,
    pub created: usize,
}

/// The lock `lock-audit` creates on `group`.
pub fn lock_spec_for(group: &ResourceGroup) -> LockSpec {
    LockSpec {
        name: format!("{}{}", group.name, config::LOCK_NAME_SUFFIX),
        level: config::LOCK_LEVEL.to_string(),
        notes: config::LOCK_NOTE.to_string(),
    }
}

/// Decide whether `group` needs a delete lock given its current locks.
///
/// `locks` is what `az lock list --resource-group` returns, which includes
/// locks on resources inside the group. A `CanNotDelete` lock on any one of
/// them counts as the group being locked.
pub fn lock_decision(group: &ResourceGroup, locks: &[ManagementLock]) -> LockDecision {
    if locks.iter().any(|l| l.level == config::LOCK_LEVEL) {
        LockDecision::AlreadyLocked
    } else {
        LockDecision::Create(lock_spec_for(group))
    }
}

/// Walk every subscription and resource group, adding missing delete locks.
///
/// The first provider error stops the run. Groups handled before it keep
/// their new locks.
pub fn audit_locks(
    provider: &impl AzureProvider,
    dry_run: bool,
) -> Result<LockAuditSummary, Box<dyn Error>> {
    let mut summary = LockAuditSummary::default();

    let subscriptions = provider.list_subscriptions()?;
    log::info!("Found {} subscriptions", subscriptions.len());

    for subscription in &subscriptions {
        summary.subscriptions += 1;
        println!(
            "Subscription: '{}' ({})",
            subscription.name.bold(),
            subscription.id
        );

        let groups = provider.list_resource_groups(subscription)?;
        log::info!(
            "Subscription '{}' has {} resource groups",
            subscription.name,
            groups.len()
        );

        for group in &groups {
            summary.groups += 1;
            let locks = provider.list_locks(subscription, group)?;
            match lock_decision(group, &locks) {
                LockDecision::AlreadyLocked => {
                    summary.already_locked += 1;
                    println!("  {:<40} {}", group.name, "locked".green());
                }
                LockDecision::Create(lock) => {
                    if dry_run {
                        println!(
                            "  {:<40} {} {}",
                            group.name,
                            "would lock".yellow(),
                            lock.name
                        );
                        continue;
                    }
                    log::warn!(
                        "Creating lock '{}' on '{}' in '{}'",
                        lock.name,
                        group.name,
                        subscription.name
                    );
                    provider.create_lock(subscription, group, &lock)?;
                    summary.created += 1;
                    println!("  {:<40} {} {}", group.name, "lock added".on_red(), lock.name);
                }
            }
        }
    }

    log::info!(
        "lock-audit done: {} subscriptions, {} groups, {} already locked, {} created",
        summary.subscriptions,
        summary.groups,
        summary.already_locked,
        summary.created
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::parse_json;

    fn group(name: &str) -> ResourceGroup {
        ResourceGroup {
            name: name.to_string(),
            id: None,
            location: None,
        }
    }

    #[test]
    fn test_lock_decision_no_locks() {
        let decision = lock_decision(&group("rg-web"), &[]);
        assert_eq!(
            decision,
            LockDecision::Create(LockSpec {
                name: "rg-web-delete".to_string(),
                level: "CanNotDelete".to_string(),
                notes: config::LOCK_NOTE.to_string(),
            })
        );
    }

    #[test]
    fn test_lock_decision_read_only_is_not_enough() {
        let locks = vec![ManagementLock {
            name: "ro".to_string(),
            level: "ReadOnly".to_string(),
            notes: None,
            id: None,
        }];
        assert!(matches!(
            lock_decision(&group("rg-web"), &locks),
            LockDecision::Create(_)
        ));
    }

    #[test]
    fn test_lock_decision_fixture_locked() {
        let json = std::fs::read_to_string("src/tests/test_data/lock_list.json")
            .expect("Error reading lock fixture");
        let locks: Vec<ManagementLock> = parse_json(&json, "lock list").expect("Error parsing");
        assert_eq!(locks.len(), 2);
        assert_eq!(
            lock_decision(&group("rg-web"), &locks),
            LockDecision::AlreadyLocked
        );
    }

    #[test]
    fn test_lock_decision_resource_lock_counts_for_group() {
        let locks = vec![ManagementLock {
            name: "keep-sql".to_string(),
            level: "CanNotDelete".to_string(),
            notes: None,
            id: Some(
                "/subscriptions/s1/resourceGroups/rg-sql/providers/Microsoft.Sql/servers/sql1/providers/Microsoft.Authorization/locks/keep-sql"
                    .to_string(),
            ),
        }];
        assert_eq!(
            lock_decision(&group("rg-sql"), &locks),
            LockDecision::AlreadyLocked
        );
    }

    #[test]
    fn test_parse_group_fixture() {
        let json = std::fs::read_to_string("src/tests/test_data/group_list.json")
            .expect("Error reading group fixture");
        let groups: Vec<ResourceGroup> = parse_json(&json, "group list").expect("Error parsing");
        assert_eq!(groups.len(), 2);
        assert_eq!(lock_spec_for(&groups[1]).name, "rg-sql-delete");
    }
}
