//! Azure SQL Server firewall rule data model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named IP range allowed through an Azure SQL Server firewall.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRule {
    /// Rule name, unique per server.
    pub name: String,
    /// First address of the allowed range.
    pub start_ip_address: String,
    /// Last address of the allowed range.
    pub end_ip_address: String,
}

impl FirewallRule {
    /// Rule allowing a single address.
    pub fn single(name: impl Into<String>, ip: impl Into<String>) -> FirewallRule {
        let ip = ip.into();
        FirewallRule {
            name: name.into(),
            start_ip_address: ip.clone(),
            end_ip_address: ip,
        }
    }

    /// Copy of this rule under another name, keeping the IP range.
    pub fn renamed(&self, name: impl Into<String>) -> FirewallRule {
        FirewallRule {
            name: name.into(),
            ..self.clone()
        }
    }

    /// True when the rule allows exactly `ip` and nothing else.
    pub fn matches_single(&self, ip: &str) -> bool {
        self.start_ip_address == ip && self.end_ip_address == ip
    }
}

impl fmt::Display for FirewallRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_ip_address == self.end_ip_address {
            write!(f, "{} [{}]", self.name, self.start_ip_address)
        } else {
            write!(
                f,
                "{} [{} - {}]",
                self.name, self.start_ip_address, self.end_ip_address
            )
        }
    }
}

/// One outbound address of an App Service and the rule name it should own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIp {
    /// 1-based position in the outbound address list.
    pub position: usize,
    /// The address.
    pub ip: String,
    /// Canonical firewall rule name for this position.
    pub canonical_name: String,
}

/// Identifies the SQL Server whose firewall is reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlServerRef {
    /// Subscription to target, or the CLI default when `None`.
    pub subscription: Option<String>,
    /// Resource group holding the server.
    pub resource_group: String,
    /// Server name.
    pub name: String,
}

impl fmt::Display for SqlServerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_group, self.name)
    }
}
