//! Display formatting for terminal output
//!
//! Plain-text renderings of API data for the CLI subcommands.

pub mod goals;
pub mod overview;
pub mod report;
pub mod tenant;
pub mod transaction;

pub use goals::format_goal_list;
pub use overview::format_overview;
pub use report::format_spending_report;
pub use tenant::{format_tenant_list, format_user};
pub use transaction::{format_page_footer, format_reclassified, format_transaction_table};

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Fixed-width bar for a 0.0..=1.0 ratio
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
