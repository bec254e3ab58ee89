//! Azure management operations used by the guardrail commands.
//!
//! [`AzureProvider`] is the seam between the command flows and Azure.
//! [`AzCli`] implements it on top of the `az` command line.

use super::cli::{run_az, run_az_json};
use crate::models::{
    FirewallRule, GenericResource, LockSpec, ManagementLock, ResourceGroup, SqlServerRef,
    Subscription, WebApp,
};
use std::error::Error;

/// Operations consumed from the Azure management API.
///
/// List operations return an empty `Vec` when nothing matches. Every error is
/// fatal to the calling flow.
pub trait AzureProvider {
    fn list_subscriptions(&self) -> Result<Vec<Subscription>, Box<dyn Error>>;

    fn list_resource_groups(
        &self,
        subscription: &Subscription,
    ) -> Result<Vec<ResourceGroup>, Box<dyn Error>>;

    fn list_locks(
        &self,
        subscription: &Subscription,
        group: &ResourceGroup,
    ) -> Result<Vec<ManagementLock>, Box<dyn Error>>;

    fn create_lock(
        &self,
        subscription: &Subscription,
        group: &ResourceGroup,
        lock: &LockSpec,
    ) -> Result<(), Box<dyn Error>>;

    fn list_firewall_rules(&self, server: &SqlServerRef)
        -> Result<Vec<FirewallRule>, Box<dyn Error>>;

    fn create_firewall_rule(
        &self,
        server: &SqlServerRef,
        rule: &FirewallRule,
    ) -> Result<(), Box<dyn Error>>;

    fn delete_firewall_rule(&self, server: &SqlServerRef, name: &str)
        -> Result<(), Box<dyn Error>>;

    /// Fails when the App Service does not exist or cannot be read.
    fn show_web_app(
        &self,
        subscription: Option<&str>,
        resource_group: &str,
        name: &str,
    ) -> Result<WebApp, Box<dyn Error>>;

    fn show_resource_by_id(&self, id: &str) -> Result<GenericResource, Box<dyn Error>>;
}

/// [`AzureProvider`] backed by the Azure CLI, using the caller's `az login`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AzCli;

impl AzCli {
    pub fn new() -> AzCli {
        AzCli
    }
}

fn subscription_arg(subscription: Option<&str>) -> String {
    match subscription {
        Some(id) => format!(" --subscription {id}"),
        None => String::new(),
    }
}

/// Quote a value so `split_and_strip` keeps it as one argument.
fn quote(value: &str) -> String {
    if value.contains('\'') {
        format!("\"{value}\"")
    } else {
        format!("'{value}'")
    }
}

fn server_args(server: &SqlServerRef) -> String {
    format!(
        "--resource-group {rg} --server {name}{sub}",
        rg = server.resource_group,
        name = server.name,
        sub = subscription_arg(server.subscription.as_deref()),
    )
}

fn create_rule_args(server: &SqlServerRef, rule: &FirewallRule) -> String {
    format!(
        "sql server firewall-rule create {server} --name {name} --start-ip-address {start} --end-ip-address {end}",
        server = server_args(server),
        name = quote(&rule.name),
        start = rule.start_ip_address,
        end = rule.end_ip_address,
    )
}

fn delete_rule_args(server: &SqlServerRef, name: &str) -> String {
    format!(
        "sql server firewall-rule delete {} --name {}",
        server_args(server),
        quote(name)
    )
}

fn web_app_lookup_error(name: &str, resource_group: &str, e: &dyn Error) -> String {
    format!("Lookup of App Service '{name}' in '{resource_group}' failed: {e}")
}

impl AzureProvider for AzCli {
    fn list_subscriptions(&self) -> Result<Vec<Subscription>, Box<dyn Error>> {
        run_az_json("account list")
    }

    fn list_resource_groups(
        &self,
        subscription: &Subscription,
    ) -> Result<Vec<ResourceGroup>, Box<dyn Error>> {
        run_az_json(&format!("group list --subscription {}", subscription.id))
    }

    fn list_locks(
        &self,
        subscription: &Subscription,
        group: &ResourceGroup,
    ) -> Result<Vec<ManagementLock>, Box<dyn Error>> {
        run_az_json(&format!(
            "lock list --resource-group {} --subscription {}",
            group.name, subscription.id
        ))
    }

    fn create_lock(
        &self,
        subscription: &Subscription,
        group: &ResourceGroup,
        lock: &LockSpec,
    ) -> Result<(), Box<dyn Error>> {
        let _created: ManagementLock = run_az_json(&format!(
            "lock create --name {name} --lock-type {level} --resource-group {rg} --notes {notes} --subscription {sub}",
            name = quote(&lock.name),
            level = lock.level,
            rg = group.name,
            notes = quote(&lock.notes),
            sub = subscription.id,
        ))?;
        Ok(())
    }

    fn list_firewall_rules(
        &self,
        server: &SqlServerRef,
    ) -> Result<Vec<FirewallRule>, Box<dyn Error>> {
        run_az_json(&format!("sql server firewall-rule list {}", server_args(server)))
    }

    fn create_firewall_rule(
        &self,
        server: &SqlServerRef,
        rule: &FirewallRule,
    ) -> Result<(), Box<dyn Error>> {
        let _created: FirewallRule = run_az_json(&create_rule_args(server, rule))?;
        Ok(())
    }

    fn delete_firewall_rule(
        &self,
        server: &SqlServerRef,
        name: &str,
    ) -> Result<(), Box<dyn Error>> {
        run_az(&delete_rule_args(server, name))?;
        Ok(())
    }

    fn show_web_app(
        &self,
        subscription: Option<&str>,
        resource_group: &str,
        name: &str,
    ) -> Result<WebApp, Box<dyn Error>> {
        run_az_json(&format!(
            "webapp show --name {name} --resource-group {resource_group}{}",
            subscription_arg(subscription)
        ))
        .map_err(|e| web_app_lookup_error(name, resource_group, &*e).into())
    }

    fn show_resource_by_id(&self, id: &str) -> Result<GenericResource, Box<dyn Error>> {
        run_az_json(&format!("resource show --ids \"{id}\""))
    }
}
