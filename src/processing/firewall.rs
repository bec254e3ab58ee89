//! Firewall rule classification.
//!
//! Compares the existing SQL firewall rules with an App Service's outbound
//! addresses and decides which rules to add, remove or deprecate. No provider
//! calls happen here; [`classify`] works on a snapshot.

use crate::config;
use crate::models::{FirewallRule, TargetIp};

/// How an existing rule relates to one target IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    /// Allows the target IP under a non canonical name.
    Redundant,
    /// Holds the canonical name but allows a different range.
    Conflicting,
    /// Canonical name and exactly the target IP.
    Correct,
}

/// Whether a target IP still needs a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpState {
    Create,
    AlreadyCorrect,
}

/// Actions computed from one snapshot of rules and addresses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// New single address rules under canonical names.
    pub to_add: Vec<FirewallRule>,
    /// Redundant rules to delete.
    pub to_remove: Vec<FirewallRule>,
    /// Conflicting rules to deprecate, or delete with `--remove-conflicts`.
    pub to_deprecate: Vec<FirewallRule>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty() && self.to_deprecate.is_empty()
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len() + self.to_deprecate.len()
    }
}

/// Canonical rule name: `App-<plan>-<app>-<NN>`, `position` is 1-based.
pub fn canonical_rule_name(plan_name: &str, app_name: &str, position: usize) -> String {
    format!(
        "{prefix}-{plan_name}-{app_name}-{position:02}",
        prefix = config::RULE_NAME_PREFIX
    )
}

/// Split a comma separated outbound address list, keeping provider order.
///
/// Entries are trimmed and empty entries dropped. Duplicates are kept.
pub fn split_outbound_ips(outbound: &str) -> Vec<String> {
    outbound
        .split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number the outbound addresses and assign their canonical names.
pub fn target_ips(plan_name: &str, app_name: &str, outbound: &str) -> Vec<TargetIp> {
    split_outbound_ips(outbound)
        .into_iter()
        .enumerate()
        .map(|(i, ip)| TargetIp {
            position: i + 1,
            canonical_name: canonical_rule_name(plan_name, app_name, i + 1),
            ip,
        })
        .collect()
}

/// Tag `rule` against `target`, or `None` when it matches neither by name
/// nor by start address.
pub fn tag_rule(rule: &FirewallRule, target: &TargetIp) -> Option<RuleTag> {
    let name_match = rule.name == target.canonical_name;
    if !name_match && rule.start_ip_address != target.ip {
        return None;
    }
    if !name_match {
        Some(RuleTag::Redundant)
    } else if rule.matches_single(&target.ip) {
        Some(RuleTag::Correct)
    } else {
        Some(RuleTag::Conflicting)
    }
}

/// Classify every target against the existing rules.
///
/// Returns the state of each target, in target order, and the plan. A rule
/// matching several targets is queued once per match.
pub fn classify_targets(
    rules: &[FirewallRule],
    targets: &[TargetIp],
) -> (Vec<IpState>, ReconcilePlan) {
    let mut plan = ReconcilePlan::default();
    let mut states = Vec::with_capacity(targets.len());

    for target in targets {
        let mut state = IpState::Create;
        for rule in rules {
            match tag_rule(rule, target) {
                Some(RuleTag::Redundant) => {
                    log::debug!("{} redundant for {}", rule, target.ip);
                    plan.to_remove.push(rule.clone());
                }
                Some(RuleTag::Conflicting) => {
                    log::debug!("{} conflicts with {}", rule, target.ip);
                    plan.to_deprecate.push(rule.clone());
                }
                Some(RuleTag::Correct) => state = IpState::AlreadyCorrect,
                None => {}
            }
        }
        if state == IpState::Create {
            plan.to_add
                .push(FirewallRule::single(&target.canonical_name, &target.ip));
        }
        states.push(state);
    }

    (states, plan)
}

/// Compute the add/remove/deprecate lists for a snapshot.
pub fn classify(rules: &[FirewallRule], targets: &[TargetIp]) -> ReconcilePlan {
    classify_targets(rules, targets).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::parse_json;

    fn rule(name: &str, start: &str, end: &str) -> FirewallRule {
        FirewallRule {
            name: name.to_string(),
            start_ip_address: start.to_string(),
            end_ip_address: end.to_string(),
        }
    }

    #[test]
    fn test_canonical_rule_name() {
        assert_eq!(canonical_rule_name("Plan1", "App1", 1), "App-Plan1-App1-01");
        assert_eq!(canonical_rule_name("Plan1", "App1", 12), "App-Plan1-App1-12");
        assert_eq!(canonical_rule_name("Plan1", "App1", 100), "App-Plan1-App1-100");
    }

    #[test]
    fn test_split_outbound_ips_keeps_order_and_duplicates() {
        assert_eq!(
            split_outbound_ips("5.6.7.8, 1.2.3.4,5.6.7.8,"),
            vec!["5.6.7.8", "1.2.3.4", "5.6.7.8"]
        );
        assert!(split_outbound_ips("").is_empty());
    }

    #[test]
    fn test_no_existing_rules() {
        let targets = target_ips("Plan1", "App1", "1.2.3.4,5.6.7.8");
        let plan = classify(&[], &targets);
        assert_eq!(
            plan.to_add,
            vec![
                FirewallRule::single("App-Plan1-App1-01", "1.2.3.4"),
                FirewallRule::single("App-Plan1-App1-02", "5.6.7.8"),
            ]
        );
        assert!(plan.to_remove.is_empty());
        assert!(plan.to_deprecate.is_empty());
    }

    #[test]
    fn test_already_correct() {
        let targets = target_ips("Plan1", "App1", "1.2.3.4");
        let rules = vec![rule("App-Plan1-App1-01", "1.2.3.4", "1.2.3.4")];
        let (states, plan) = classify_targets(&rules, &targets);
        assert_eq!(states, vec![IpState::AlreadyCorrect]);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_conflicting_name_still_creates() {
        let targets = target_ips("Plan1", "App1", "1.2.3.4");
        let rules = vec![rule("App-Plan1-App1-01", "9.9.9.9", "9.9.9.9")];
        let (states, plan) = classify_targets(&rules, &targets);
        assert_eq!(states, vec![IpState::Create]);
        assert_eq!(plan.to_deprecate, rules);
        assert_eq!(
            plan.to_add,
            vec![FirewallRule::single("App-Plan1-App1-01", "1.2.3.4")]
        );
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn test_conflicting_end_address() {
        let target = &target_ips("Plan1", "App1", "1.2.3.4")[0];
        let wide = rule("App-Plan1-App1-01", "1.2.3.4", "1.2.3.10");
        assert_eq!(tag_rule(&wide, target), Some(RuleTag::Conflicting));
    }

    #[test]
    fn test_redundant_name_removed_and_recreated() {
        let targets = target_ips("Plan1", "App1", "1.2.3.4");
        let rules = vec![rule("legacy-app1", "1.2.3.4", "1.2.3.4")];
        let plan = classify(&rules, &targets);
        assert_eq!(plan.to_remove, rules);
        assert_eq!(
            plan.to_add,
            vec![FirewallRule::single("App-Plan1-App1-01", "1.2.3.4")]
        );
        assert!(plan.to_deprecate.is_empty());
    }

    #[test]
    fn test_unrelated_rules_ignored() {
        let target = &target_ips("Plan1", "App1", "1.2.3.4")[0];
        let office = rule("office", "10.0.0.1", "10.0.0.9");
        assert_eq!(tag_rule(&office, target), None);
        // matched on start address only
        let range = rule("range", "1.2.3.4", "1.2.3.20");
        assert_eq!(tag_rule(&range, target), Some(RuleTag::Redundant));
    }

    #[test]
    fn test_reordered_ips_overlap() {
        // Provider swapped the order: each old rule is both redundant for its
        // address and conflicting for its old canonical slot.
        let targets = target_ips("Plan1", "App1", "5.6.7.8,1.2.3.4");
        let rules = vec![
            rule("App-Plan1-App1-01", "1.2.3.4", "1.2.3.4"),
            rule("App-Plan1-App1-02", "5.6.7.8", "5.6.7.8"),
        ];
        let plan = classify(&rules, &targets);
        assert_eq!(plan.to_add.len(), 2);
        assert_eq!(plan.to_remove.len(), 2);
        assert_eq!(plan.to_deprecate.len(), 2);
    }

    #[test]
    fn test_classify_fixture() {
        let json = std::fs::read_to_string("src/tests/test_data/firewall_rule_list.json")
            .expect("Error reading firewall fixture");
        let rules: Vec<FirewallRule> =
            parse_json(&json, "sql server firewall-rule list").expect("Error parsing rules");
        assert_eq!(rules.len(), 4);

        let targets = target_ips("Plan1", "App1", "1.2.3.4,5.6.7.8");
        let (states, plan) = classify_targets(&rules, &targets);
        assert_eq!(states, vec![IpState::AlreadyCorrect, IpState::Create]);
        assert_eq!(
            plan.to_add,
            vec![FirewallRule::single("App-Plan1-App1-02", "5.6.7.8")]
        );
        assert_eq!(plan.to_remove[0].name, "old-app1-ip");
        assert_eq!(plan.to_deprecate[0].name, "App-Plan1-App1-02");
        assert_eq!(plan.len(), 3);
    }
}
