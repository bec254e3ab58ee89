//! Azure subscription, resource group and generic resource models.

use serde::{Deserialize, Serialize};

/// An Azure subscription from `az account list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription ID (GUID).
    pub id: String,
    /// Display name.
    pub name: String,
    /// `Enabled`, `Disabled`, ...
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// An Azure resource group from `az group list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// The App Service fields used to derive firewall rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebApp {
    pub name: String,
    /// Comma separated outbound addresses.
    #[serde(default)]
    pub outbound_ip_addresses: Option<String>,
    /// Resource ID of the owning App Service Plan.
    #[serde(default)]
    pub server_farm_id: Option<String>,
    #[serde(default)]
    pub resource_group: Option<String>,
}

/// Any resource fetched by ID with `az resource show --ids`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenericResource {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
}
