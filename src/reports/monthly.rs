//! Monthly report
//!
//! Budget against actual spending, the spending split and a calendar of
//! daily expense for one month.

use chrono::Datelike;

use crate::models::{Budget, BudgetPeriod, Money, Transaction};

use super::{expense_by_category, report_categories, FinancialSummary};

/// Short Indonesian weekday names, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sen", "Sel", "Rab", "Kam", "Jum", "Sab", "Min"];

/// Allocation and spending for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    pub category: String,
    pub budget: Money,
    pub actual: Money,
}

impl BudgetLine {
    /// Budget left over; negative when overspent
    pub fn remaining(&self) -> Money {
        self.budget - self.actual
    }

    pub fn is_overspent(&self) -> bool {
        self.actual > self.budget
    }
}

/// One category's share of the month's spending
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub category: String,
    pub amount: Money,
    pub percentage: f64,
}

/// One day of the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatCell {
    pub day: u32,
    pub amount: Money,
}

/// Daily expense laid out in Monday-first weeks
///
/// Slots before the first and after the last day of the month are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHeatmap {
    pub weeks: Vec<[Option<HeatCell>; 7]>,
}

impl CalendarHeatmap {
    pub fn build(period: BudgetPeriod, transactions: &[Transaction]) -> Self {
        let mut daily = vec![Money::zero(); period.days_in_month() as usize];
        for txn in transactions
            .iter()
            .filter(|t| t.is_expense() && period.contains(t.date))
        {
            daily[(txn.date.day() - 1) as usize] += txn.amount;
        }

        let offset = period.start_date().weekday().num_days_from_monday() as usize;
        let slots = offset + daily.len();
        let mut weeks = vec![[None; 7]; slots.div_ceil(7)];
        for (i, amount) in daily.into_iter().enumerate() {
            let slot = offset + i;
            weeks[slot / 7][slot % 7] = Some(HeatCell {
                day: i as u32 + 1,
                amount,
            });
        }

        Self { weeks }
    }

    /// The busiest day, if anything was spent
    pub fn peak(&self) -> Option<HeatCell> {
        self.weeks
            .iter()
            .flatten()
            .flatten()
            .filter(|cell| cell.amount.is_positive())
            .max_by_key(|cell| cell.amount)
            .copied()
    }
}

/// Everything shown for one month
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub period: BudgetPeriod,
    pub summary: FinancialSummary,
    pub budget_vs_actual: Vec<BudgetLine>,
    /// Categories with spending, in report order
    pub distribution: Vec<DistributionSlice>,
    pub heatmap: CalendarHeatmap,
}

impl MonthlyReport {
    /// Build the report for `period` from the full transaction history
    pub fn generate(transactions: &[Transaction], budget: &Budget, period: BudgetPeriod) -> Self {
        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .cloned()
            .collect();

        let categories = report_categories(budget);
        let actual = expense_by_category(&in_month, &categories);

        let budget_vs_actual = categories
            .iter()
            .zip(&actual)
            .map(|(category, actual)| BudgetLine {
                category: category.clone(),
                budget: budget.get(category).unwrap_or_default(),
                actual: *actual,
            })
            .collect();

        let spent: Money = actual.iter().filter(|a| a.is_positive()).sum();
        let distribution = categories
            .iter()
            .zip(&actual)
            .filter(|(_, amount)| amount.is_positive())
            .map(|(category, amount)| DistributionSlice {
                category: category.clone(),
                amount: *amount,
                percentage: amount.cents() as f64 / spent.cents() as f64 * 100.0,
            })
            .collect();

        Self {
            period,
            summary: FinancialSummary::from_transactions(&in_month),
            budget_vs_actual,
            distribution,
            heatmap: CalendarHeatmap::build(period, &in_month),
        }
    }

    /// Total allocated across the report's categories
    pub fn total_budget(&self) -> Money {
        self.budget_vs_actual.iter().map(|l| l.budget).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{expense, income};
    use super::*;
    use crate::models::Bucket;

    #[test]
    fn test_budget_vs_actual_zero_fills() {
        let txns = vec![
            income(2024, 8, 1, 6_000_000),
            expense(2024, 8, 3, Bucket::Food, 100_000),
            expense(2024, 8, 4, Bucket::Food, 50_000),
            expense(2024, 9, 1, Bucket::Food, 999),
        ];
        let mut budget = Budget::new();
        budget.set("Makanan", Money::from_units(120_000));
        budget.set("Transport", Money::from_units(80_000));

        let report = MonthlyReport::generate(&txns, &budget, BudgetPeriod::monthly(2024, 8));

        assert_eq!(report.budget_vs_actual.len(), 2);
        let food = &report.budget_vs_actual[0];
        assert_eq!(food.actual, Money::from_units(150_000));
        assert!(food.is_overspent());
        assert_eq!(food.remaining(), Money::from_units(-30_000));
        assert_eq!(report.budget_vs_actual[1].actual, Money::zero());
        assert_eq!(report.summary.balance, Money::from_units(5_850_000));
        assert_eq!(report.total_budget(), Money::from_units(200_000));
    }

    #[test]
    fn test_empty_budget_uses_six_buckets() {
        let txns = vec![expense(2024, 8, 3, Bucket::Savings, 10)];
        let report = MonthlyReport::generate(&txns, &Budget::new(), BudgetPeriod::monthly(2024, 8));

        assert_eq!(report.budget_vs_actual.len(), 6);
        assert_eq!(report.budget_vs_actual[4].category, "Tabungan");
        assert_eq!(report.budget_vs_actual[4].actual, Money::from_units(10));
    }

    #[test]
    fn test_distribution_skips_zero_categories() {
        let txns = vec![
            expense(2024, 8, 3, Bucket::Food, 300),
            expense(2024, 8, 5, Bucket::Entertainment, 100),
        ];
        let report = MonthlyReport::generate(&txns, &Budget::default_buckets(), BudgetPeriod::monthly(2024, 8));

        assert_eq!(report.distribution.len(), 2);
        assert_eq!(report.distribution[0].category, "Makanan");
        assert_eq!(report.distribution[0].percentage, 75.0);
        assert_eq!(report.distribution[1].percentage, 25.0);
    }

    #[test]
    fn test_heatmap_layout() {
        // August 2024 starts on a Thursday and has 31 days
        let txns = vec![
            expense(2024, 8, 1, Bucket::Food, 10),
            expense(2024, 8, 1, Bucket::Transport, 5),
            expense(2024, 8, 31, Bucket::Food, 7),
            income(2024, 8, 2, 1_000),
        ];
        let heatmap = CalendarHeatmap::build(BudgetPeriod::monthly(2024, 8), &txns);

        assert_eq!(heatmap.weeks.len(), 5);
        assert_eq!(heatmap.weeks[0][0], None);
        assert_eq!(heatmap.weeks[0][2], None);
        assert_eq!(
            heatmap.weeks[0][3],
            Some(HeatCell { day: 1, amount: Money::from_units(15) })
        );
        assert_eq!(heatmap.weeks[0][4].unwrap().amount, Money::zero());
        assert_eq!(heatmap.weeks[4][5].unwrap().day, 31);
        assert_eq!(heatmap.weeks[4][6], None);
        assert_eq!(heatmap.peak().unwrap().day, 1);
    }

    #[test]
    fn test_heatmap_month_starting_monday() {
        // July 2024 starts on a Monday
        let heatmap = CalendarHeatmap::build(BudgetPeriod::monthly(2024, 7), &[]);
        assert_eq!(heatmap.weeks[0][0].unwrap().day, 1);
        assert_eq!(heatmap.weeks.len(), 5);
        assert!(heatmap.peak().is_none());
    }
}
