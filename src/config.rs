//! Static configuration for the guardrail commands.

/// Default Azure CLI binary, overridden by the `AZ_CLI_PATH` env var.
pub const AZ_BIN: &str = "az";
/// Environment variable naming an alternative Azure CLI binary.
pub const AZ_BIN_ENV: &str = "AZ_CLI_PATH";

/// Refuse to parse `az` output larger than this (bytes).
pub const MAX_OUTPUT_BYTES: usize = 5_000_000;

/// Lock level that blocks deletion only.
pub const LOCK_LEVEL: &str = "CanNotDelete";
/// Suffix appended to the resource group name to name its lock.
pub const LOCK_NAME_SUFFIX: &str = "-delete";
/// Note attached to every lock created by `lock-audit`.
pub const LOCK_NOTE: &str = "Protect resource group from accidental deletion";

/// Prefix of canonical App Service firewall rule names.
pub const RULE_NAME_PREFIX: &str = "App";
/// Prefix of deprecated firewall rule names, followed by the timestamp.
pub const DEPRECATED_PREFIX: &str = "DEP";
/// chrono format of the deprecation timestamp: yy MM dd ss.
pub const DEPRECATED_STAMP_FORMAT: &str = "%y%m%d%S";

/// Logging configuration file read at startup.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Resolve the Azure CLI binary to run.
pub fn az_bin() -> String {
    std::env::var(AZ_BIN_ENV).unwrap_or_else(|_| AZ_BIN.to_string())
}
