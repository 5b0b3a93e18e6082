//! Historical spending averages
//!
//! Feeds budget suggestions with what was actually spent per bucket over
//! the most recent months of history.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Bucket, BudgetPeriod, Transaction};

/// The `months_back` most recent distinct months present in the data
///
/// `months_back == 0`, or fewer months than asked for, selects every month.
pub fn recent_periods(transactions: &[Transaction], months_back: usize) -> BTreeSet<BudgetPeriod> {
    let periods: BTreeSet<BudgetPeriod> = transactions.iter().map(Transaction::period).collect();
    if months_back == 0 || periods.len() <= months_back {
        return periods;
    }
    periods.into_iter().rev().take(months_back).collect()
}

/// Average amount per transaction for each requested bucket
///
/// Rows are matched on their subcategory label. The average is taken over
/// the matching rows of the look-back window, so it is a per-occurrence
/// mean rather than a per-month total. Buckets with no matching rows map to
/// 0.0; values are rounded to two decimals.
pub fn average_by_category(
    transactions: &[Transaction],
    buckets: &[Bucket],
    months_back: usize,
) -> BTreeMap<Bucket, f64> {
    let mut averages: BTreeMap<Bucket, f64> = buckets.iter().map(|b| (*b, 0.0)).collect();
    if transactions.is_empty() {
        return averages;
    }

    let window = recent_periods(transactions, months_back);
    let mut totals: BTreeMap<Bucket, (f64, usize)> = BTreeMap::new();

    for txn in transactions {
        if !window.contains(&txn.period()) {
            continue;
        }
        let Some(bucket) = txn.bucket() else {
            continue;
        };
        if !averages.contains_key(&bucket) {
            continue;
        }
        let entry = totals.entry(bucket).or_insert((0.0, 0));
        entry.0 += txn.amount.to_f64();
        entry.1 += 1;
    }

    for (bucket, (sum, count)) in totals {
        averages.insert(bucket, round2(sum / count as f64));
    }
    averages
}

/// Mean monthly income over the look-back window
///
/// Income is summed per calendar month and averaged over the months that
/// have any income; 0.0 when there is none.
pub fn average_monthly_income(transactions: &[Transaction], months_back: usize) -> f64 {
    let window = recent_periods(transactions, months_back);

    let mut per_month: BTreeMap<BudgetPeriod, f64> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_income()) {
        let period = txn.period();
        if window.contains(&period) {
            *per_month.entry(period).or_default() += txn.amount.to_f64();
        }
    }

    if per_month.is_empty() {
        return 0.0;
    }
    round2(per_month.values().sum::<f64>() / per_month.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money, PaymentMethod, Subcategory};
    use chrono::NaiveDate;

    fn txn(y: i32, m: u32, d: u32, kind: EntryKind, sub: Subcategory, units: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "test",
            Money::from_units(units),
            kind,
            sub,
            PaymentMethod::Cash,
        )
    }

    fn food(y: i32, m: u32, d: u32, units: i64) -> Transaction {
        txn(y, m, d, EntryKind::Expense, Subcategory::Spending(Bucket::Food), units)
    }

    #[test]
    fn test_empty_history_maps_to_zero() {
        let averages = average_by_category(&[], &Bucket::ALL, 3);
        assert_eq!(averages.len(), 6);
        assert!(averages.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_scenario_mean_of_rows() {
        let history = vec![
            txn(2024, 1, 5, EntryKind::Income, Subcategory::Salary, 5_000_000),
            food(2024, 1, 10, 200_000),
            food(2024, 2, 2, 300_000),
        ];

        let averages = average_by_category(&history, &Bucket::ALL, 2);
        assert_eq!(averages[&Bucket::Food], 250_000.0);
        assert_eq!(averages[&Bucket::Transport], 0.0);
        assert_eq!(averages[&Bucket::Other], 0.0);
    }

    #[test]
    fn test_window_keeps_most_recent_months() {
        let history = vec![
            food(2024, 1, 1, 1_000),
            food(2024, 2, 1, 2_000),
            food(2024, 3, 1, 3_000),
            food(2024, 4, 1, 4_000),
            food(2024, 5, 1, 5_000),
        ];

        let window = recent_periods(&history, 3);
        assert_eq!(window.len(), 3);
        assert!(!window.contains(&BudgetPeriod::monthly(2024, 2)));

        let averages = average_by_category(&history, &[Bucket::Food], 3);
        assert_eq!(averages[&Bucket::Food], 4_000.0);

        let all = average_by_category(&history, &[Bucket::Food], 10);
        assert_eq!(all[&Bucket::Food], 3_000.0);
        assert_eq!(average_by_category(&history, &[Bucket::Food], 0), all);
    }

    #[test]
    fn test_only_requested_buckets_reported() {
        let history = vec![
            food(2024, 1, 1, 1_000),
            txn(2024, 1, 2, EntryKind::Expense, Subcategory::Spending(Bucket::Savings), 50),
        ];

        let averages = average_by_category(&history, &[Bucket::Savings], 0);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[&Bucket::Savings], 50.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let history = vec![food(2024, 1, 1, 1), food(2024, 1, 2, 1), food(2024, 1, 3, 2)];
        let averages = average_by_category(&history, &[Bucket::Food], 0);
        assert_eq!(averages[&Bucket::Food], 1.33);
    }

    #[test]
    fn test_average_monthly_income() {
        let history = vec![
            txn(2024, 1, 5, EntryKind::Income, Subcategory::Salary, 5_000_000),
            txn(2024, 1, 20, EntryKind::Income, Subcategory::Bonus, 1_000_000),
            txn(2024, 2, 5, EntryKind::Income, Subcategory::Salary, 5_000_000),
            food(2024, 3, 1, 100),
        ];

        assert_eq!(average_monthly_income(&history, 0), 5_500_000.0);
        assert_eq!(average_monthly_income(&history, 1), 0.0);
        assert_eq!(average_monthly_income(&[], 0), 0.0);
    }
}
