//! Budget allocation model
//!
//! Maps a category label to the amount allocated to it. Entries keep the
//! order they were inserted (or read from disk) in.

use serde::{Deserialize, Serialize};

use super::category::Bucket;
use super::money::Money;

pub const COL_BUDGET_CATEGORY: &str = "Kategori";
pub const COL_BUDGET_AMOUNT: &str = "Anggaran";

/// One row of the budget file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetEntry {
    pub category: String,
    pub amount: Money,
}

/// On-disk shape of a budget row
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct BudgetRecord {
    #[serde(rename = "Kategori")]
    pub category: String,
    #[serde(rename = "Anggaran")]
    pub amount: String,
}

/// Category -> allocated amount
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Budget {
    entries: Vec<BudgetEntry>,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six spending buckets, each allocated zero
    pub fn default_buckets() -> Self {
        let mut budget = Self::new();
        for bucket in Bucket::ALL {
            budget.set(bucket.label(), Money::zero());
        }
        budget
    }

    /// Set the allocation for a category, replacing it in place if present
    pub fn set(&mut self, category: impl Into<String>, amount: Money) {
        let category = category.into();
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.amount = amount,
            None => self.entries.push(BudgetEntry { category, amount }),
        }
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount)
    }

    /// Allocation for a bucket, zero when the budget has no entry for it
    pub fn amount_for(&self, bucket: Bucket) -> Money {
        self.get(bucket.label()).unwrap_or_default()
    }

    /// Every requested bucket with its allocation, zero-filled
    pub fn reindexed(&self, buckets: &[Bucket]) -> Vec<(Bucket, Money)> {
        buckets
            .iter()
            .map(|bucket| (*bucket, self.amount_for(*bucket)))
            .collect()
    }

    /// Category labels in insertion order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    pub fn entries(&self) -> &[BudgetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

impl FromIterator<(String, Money)> for Budget {
    fn from_iter<I: IntoIterator<Item = (String, Money)>>(iter: I) -> Self {
        let mut budget = Self::new();
        for (category, amount) in iter {
            budget.set(category, amount);
        }
        budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_buckets() {
        let budget = Budget::default_buckets();
        assert_eq!(budget.len(), 6);
        assert!(budget.total().is_zero());
        assert_eq!(
            budget.categories().collect::<Vec<_>>(),
            vec!["Makanan", "Transport", "Belanja", "Hiburan", "Tabungan", "Lainnya"]
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut budget = Budget::new();
        budget.set("Makanan", Money::from_units(100));
        budget.set("Hiburan", Money::from_units(50));
        budget.set("Makanan", Money::from_units(200));

        assert_eq!(budget.len(), 2);
        assert_eq!(budget.entries()[0].category, "Makanan");
        assert_eq!(budget.get("Makanan"), Some(Money::from_units(200)));
    }

    #[test]
    fn test_reindexed_fills_zero() {
        let mut budget = Budget::new();
        budget.set("Transport", Money::from_units(400_000));

        let full = budget.reindexed(&Bucket::ALL);
        assert_eq!(full.len(), 6);
        assert_eq!(full[1], (Bucket::Transport, Money::from_units(400_000)));
        assert_eq!(full[0], (Bucket::Food, Money::zero()));
        assert_eq!(budget.amount_for(Bucket::Savings), Money::zero());
    }
}
