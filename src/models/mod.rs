//! Domain models for the Azure guardrail commands.
//!
//! - [`FirewallRule`], [`TargetIp`] and [`SqlServerRef`] - SQL firewall reconciliation
//! - [`ManagementLock`] and [`LockSpec`] - resource group locks
//! - [`Subscription`], [`ResourceGroup`], [`WebApp`], [`GenericResource`] - provider resources

mod firewall;
mod lock;
mod resource;

pub use firewall::{FirewallRule, SqlServerRef, TargetIp};
pub use lock::{LockSpec, ManagementLock};
pub use resource::{GenericResource, ResourceGroup, Subscription, WebApp};
