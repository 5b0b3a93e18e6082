//! Service layer for pfa
//!
//! Business logic on top of the storage layer: transaction editing,
//! historical averages and AI-assisted budget suggestions.

pub mod advisor;
pub mod history;
pub mod parser;
pub mod transactions;

pub use advisor::{
    suggest_budget, BudgetDraft, BudgetRequest, OpenRouterClient, Suggestion, TextGenerator,
};
pub use history::{average_by_category, average_monthly_income};
pub use parser::{parse_budget_table, parse_row, ParsedBudget, ParsedRow};
pub use transactions::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
