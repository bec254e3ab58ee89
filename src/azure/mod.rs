//! Azure CLI interaction.
//!
//! This module handles all Azure-related operations:
//! - [`cli`] - Command execution and JSON parsing for the Azure CLI
//! - [`provider`] - The [`AzureProvider`] seam and its `az` implementation

mod cli;
mod provider;

// Re-export public types and functions
pub use cli::{parse_json, run, run_az, run_az_json};
pub use provider::{AzCli, AzureProvider};
