//! Budget store backed by `budget.csv`
//!
//! Two columns, `Kategori` and `Anggaran`, one row per category. The file
//! is rewritten whole on every save.

use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::error::{PfaError, PfaResult};
use crate::models::budget::BudgetRecord;
use crate::models::{Budget, Money};

use super::file_io::{is_missing_or_empty, write_atomic};

/// File-backed store for the category -> allocation mapping
#[derive(Debug, Clone)]
pub struct BudgetStore {
    path: PathBuf,
}

impl BudgetStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored budget
    ///
    /// A missing, empty or header-less file is replaced by the six default
    /// buckets at zero. Buckets absent from an existing file are not filled
    /// in; use [`Budget::amount_for`] or [`Budget::reindexed`] for that.
    pub fn try_load(&self) -> PfaResult<Budget> {
        if is_missing_or_empty(&self.path)? {
            return self.write_defaults();
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(&self.path)
            .map_err(|e| {
                PfaError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        if reader.headers()?.iter().all(|h| h.trim().is_empty()) {
            return self.write_defaults();
        }

        let mut budget = Budget::new();
        for record in reader.deserialize::<BudgetRecord>() {
            let record = record.map_err(|e| {
                PfaError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
            })?;

            let raw = record.amount.trim();
            let amount = if raw.is_empty() {
                Money::zero()
            } else {
                match Money::parse(raw) {
                    Ok(amount) => amount,
                    Err(e) => {
                        warn!("Skipping budget row '{}': {}", record.category, e);
                        continue;
                    }
                }
            };
            budget.set(record.category, amount);
        }

        debug!("Loaded {} budget entries", budget.len());
        Ok(budget)
    }

    /// Like [`try_load`](Self::try_load), but never fails
    ///
    /// On error the default buckets are returned and the file is left alone.
    pub fn load(&self) -> Budget {
        self.try_load().unwrap_or_else(|e| {
            error!("Error loading budget: {}", e);
            Budget::default_buckets()
        })
    }

    /// Replace the stored budget
    ///
    /// An empty budget is stored as the six default buckets.
    pub fn try_save(&self, budget: &Budget) -> PfaResult<()> {
        let defaults;
        let budget = if budget.is_empty() {
            defaults = Budget::default_buckets();
            &defaults
        } else {
            budget
        };

        write_atomic(&self.path, |writer| {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for entry in budget.entries() {
                csv_writer.serialize(BudgetRecord {
                    category: entry.category.clone(),
                    amount: entry.amount.to_plain_string(),
                })?;
            }
            csv_writer.flush()?;
            Ok(())
        })?;

        debug!("Saved {} budget entries", budget.len());
        Ok(())
    }

    /// Like [`try_save`](Self::try_save), reporting failure as `false`
    pub fn save(&self, budget: &Budget) -> bool {
        match self.try_save(budget) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving budget: {}", e);
                false
            }
        }
    }

    fn write_defaults(&self) -> PfaResult<Budget> {
        debug!("Writing default budget to {}", self.path.display());
        let budget = Budget::default_buckets();
        self.try_save(&budget)?;
        Ok(budget)
    }
}
