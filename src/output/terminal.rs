//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use colored::{ColoredString, Colorize};

/// Format a value as a quoted, left-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("'{}'", value.to_string());
    format!("{quoted:<width$}")
}

/// Colored label for a planned firewall action.
pub fn action_label(action: &str) -> ColoredString {
    match action {
        "ADD" => action.green(),
        "REMOVE" => action.red(),
        "DEPRECATE" => action.yellow(),
        _ => action.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "'test'    ");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "'long_value'");
    }

    #[test]
    fn test_action_label_text() {
        assert!(action_label("ADD").to_string().contains("ADD"));
    }
}
