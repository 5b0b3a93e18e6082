//! Yearly report
//!
//! Month-by-month cash flow and spending per category for one year.

use std::collections::BTreeMap;

use crate::models::{Budget, BudgetPeriod, Money, Transaction};

use super::{expense_by_category, report_categories, FinancialSummary};

/// Income against expense for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFlow {
    pub period: BudgetPeriod,
    pub income: Money,
    pub expense: Money,
}

impl MonthFlow {
    /// Net cash flow (income minus expense)
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Spending per category for one month, aligned with
/// [`YearlyReport::categories`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpending {
    pub period: BudgetPeriod,
    pub amounts: Vec<Money>,
}

#[derive(Debug, Clone)]
pub struct YearlyReport {
    pub year: i32,
    pub summary: FinancialSummary,
    /// Months with any transaction, oldest first
    pub cash_flow: Vec<MonthFlow>,
    pub categories: Vec<String>,
    /// Months with any expense, oldest first
    pub spending: Vec<MonthSpending>,
}

impl YearlyReport {
    pub fn generate(transactions: &[Transaction], budget: &Budget, year: i32) -> Self {
        let mut by_month: BTreeMap<BudgetPeriod, Vec<&Transaction>> = BTreeMap::new();
        for txn in transactions.iter().filter(|t| t.period().year() == year) {
            by_month.entry(txn.period()).or_default().push(txn);
        }

        let categories = report_categories(budget);

        let cash_flow = by_month
            .iter()
            .map(|(period, txns)| {
                let summary = FinancialSummary::from_transactions(txns.iter().copied());
                MonthFlow {
                    period: *period,
                    income: summary.total_income,
                    expense: summary.total_expense,
                }
            })
            .collect();

        let spending = by_month
            .iter()
            .filter(|(_, txns)| txns.iter().any(|t| t.is_expense()))
            .map(|(period, txns)| MonthSpending {
                period: *period,
                amounts: expense_by_category(txns.iter().copied(), &categories),
            })
            .collect();

        Self {
            year,
            summary: FinancialSummary::from_transactions(by_month.values().flatten().copied()),
            cash_flow,
            categories,
            spending,
        }
    }

    /// Yearly spending per category, aligned with `categories`
    pub fn category_totals(&self) -> Vec<Money> {
        let mut totals = vec![Money::zero(); self.categories.len()];
        for month in &self.spending {
            for (total, amount) in totals.iter_mut().zip(&month.amounts) {
                *total += *amount;
            }
        }
        totals
    }
}
