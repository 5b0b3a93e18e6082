//! Display formatting for terminal output
//!
//! Tabular listings are rendered with `tabled`; free-form layouts such as
//! the calendar heatmap are formatted by hand.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{format_budget, format_draft};
pub use report::{format_history, format_monthly_report, format_yearly_report};
pub use transaction::{format_transaction_details, format_transaction_register, format_upload_summary};

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows as a rounded table followed by a newline
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Truncate a string to a maximum number of characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
