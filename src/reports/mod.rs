//! Reports module for pfa
//!
//! The numbers behind the analysis views: monthly budget-vs-actual,
//! spending distribution and calendar heatmap, and yearly cash flow.

pub mod monthly;
pub mod yearly;

pub use monthly::{BudgetLine, CalendarHeatmap, DistributionSlice, HeatCell, MonthlyReport};
pub use yearly::{MonthFlow, MonthSpending, YearlyReport};

use std::collections::BTreeSet;

use crate::models::{Bucket, Budget, BudgetPeriod, Money, Transaction};

/// Income, expense and what is left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
}

impl FinancialSummary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::default();
        for txn in transactions {
            if txn.is_income() {
                summary.total_income += txn.amount;
            } else if txn.is_expense() {
                summary.total_expense += txn.amount;
            }
        }
        summary.balance = summary.total_income - summary.total_expense;
        summary
    }
}

/// Months with at least one transaction, oldest first
pub fn available_months(transactions: &[Transaction]) -> Vec<BudgetPeriod> {
    transactions
        .iter()
        .map(Transaction::period)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Years with at least one transaction, oldest first
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    transactions
        .iter()
        .map(|t| t.period().year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Categories the reports break spending down by
///
/// The budget's own categories, or the six buckets when the budget is empty.
pub fn report_categories(budget: &Budget) -> Vec<String> {
    if budget.is_empty() {
        Bucket::ALL.iter().map(|b| b.label().to_string()).collect()
    } else {
        budget.categories().map(str::to_string).collect()
    }
}

/// Expense total for each category in `categories`, zero-filled
pub(crate) fn expense_by_category<'a, I>(transactions: I, categories: &[String]) -> Vec<Money>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = vec![Money::zero(); categories.len()];
    for txn in transactions.into_iter().filter(|t| t.is_expense()) {
        if let Some(i) = categories.iter().position(|c| *c == txn.subcategory) {
            totals[i] += txn.amount;
        }
    }
    totals
}
