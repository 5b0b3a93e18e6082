//! Budget display formatting

use tabled::Tabled;

use crate::models::Budget;
use crate::services::BudgetDraft;

use super::render_table;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Anggaran")]
    amount: String,
}

#[derive(Tabled)]
struct DraftRow {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Anggaran")]
    amount: String,
    #[tabled(rename = "%")]
    percent: String,
}

/// Format the stored budget with a total line
pub fn format_budget(budget: &Budget, symbol: &str) -> String {
    if budget.is_empty() {
        return "No budget set.\n".to_string();
    }

    let rows = budget
        .entries()
        .iter()
        .map(|entry| BudgetRow {
            category: entry.category.clone(),
            amount: entry.amount.format_with_symbol(symbol),
        })
        .collect();

    let mut output = render_table(rows);
    output.push_str(&format!("Total: {}\n", budget.total().format_with_symbol(symbol)));
    output
}

/// Format a suggested budget, showing the suggested share where known
pub fn format_draft(draft: &BudgetDraft, symbol: &str) -> String {
    let rows = draft
        .entries()
        .iter()
        .map(|entry| DraftRow {
            category: entry.bucket.label().to_string(),
            amount: entry.amount.format_with_symbol(symbol),
            percent: entry
                .percent
                .map(|p| format!("{:.2}%", p))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut output = render_table(rows);
    output.push_str(&format!("Total: {}\n", draft.total().format_with_symbol(symbol)));
    output
}
