//! Storage layer for pfa
//!
//! Flat CSV files under the data directory, each written atomically and
//! always rewritten whole.

pub mod budget;
pub mod file_io;
pub mod transactions;

pub use budget::BudgetStore;
pub use file_io::{write_csv_atomic, write_json_atomic};
pub use transactions::{TransactionStore, UploadSummary};

use crate::config::paths::PfaPaths;
use crate::error::PfaResult;

/// Storage coordinator owning both stores for one data directory
#[derive(Debug, Clone)]
pub struct Storage {
    paths: PfaPaths,
    pub transactions: TransactionStore,
    pub budget: BudgetStore,
}

impl Storage {
    /// Create the stores, making sure the data directory exists
    pub fn new(paths: PfaPaths) -> PfaResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionStore::new(paths.transactions_file()),
            budget: BudgetStore::new(paths.budget_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &PfaPaths {
        &self.paths
    }
}
