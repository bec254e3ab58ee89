//! Console output.
//!
//! - [`plan`] - Firewall plan and run summaries
//! - [`terminal`] - Field and label formatting helpers

mod plan;
mod terminal;

pub use plan::{plan_lines, print_apply_summary, print_lock_summary, print_plan};
pub use terminal::{action_label, format_field};
