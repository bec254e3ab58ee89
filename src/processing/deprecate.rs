//! Naming of deprecated firewall rules.

use crate::config;
use chrono::{DateTime, TimeZone};

/// Timestamp used in deprecated rule names: two digit year, month, day and second.
///
/// Two runs in the same second bucket of a day produce the same stamp.
pub fn deprecation_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(config::DEPRECATED_STAMP_FORMAT).to_string()
}

/// `DEP<stamp>-<original name>`.
pub fn deprecated_rule_name(stamp: &str, original: &str) -> String {
    format!("{}{stamp}-{original}", config::DEPRECATED_PREFIX)
}
