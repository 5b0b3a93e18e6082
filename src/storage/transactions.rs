//! Transaction store backed by `transactions.csv`
//!
//! The whole table is read and rewritten on every operation. Loading is
//! forgiving (bad rows are dropped and logged); saving is strict (the first
//! bad row aborts the save and the previous file stays in place).

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::error::{PfaError, PfaResult};
use crate::models::{Table, Transaction, CANONICAL_COLUMNS};

use super::file_io::{is_missing_or_empty, write_csv_atomic};

/// Outcome of merging an uploaded table into the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Uploaded rows that parsed
    pub accepted: usize,
    /// Uploaded rows dropped for an unparseable date or amount
    pub dropped: usize,
    /// Rows removed as exact duplicates after the merge
    pub duplicates: usize,
    /// Rows in the store after saving
    pub total: usize,
}

impl UploadSummary {
    /// Uploaded rows that actually ended up in the store
    pub fn added(&self) -> usize {
        self.accepted.saturating_sub(self.duplicates)
    }
}

/// File-backed store for the transaction table
#[derive(Debug, Clone)]
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every valid transaction, newest first
    ///
    /// A missing file is created with just the canonical header row. Rows
    /// whose date or amount cannot be parsed are dropped.
    pub fn try_load(&self) -> PfaResult<Vec<Transaction>> {
        if is_missing_or_empty(&self.path)? {
            debug!("Creating new transaction file at {}", self.path.display());
            self.try_save(&[])?;
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            PfaError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        let table = Table::from_csv_reader(BufReader::new(file))?;

        let transactions = normalize_lenient(&table, "stored");
        debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }

    /// Like [`try_load`](Self::try_load), but never fails
    ///
    /// Any error is logged and an empty list returned.
    pub fn load(&self) -> Vec<Transaction> {
        self.try_load().unwrap_or_else(|e| {
            error!("Error loading transactions: {}", e);
            Vec::new()
        })
    }

    /// Validate and save an untyped table
    ///
    /// `None` or a table without rows saves an empty canonical table.
    /// Missing columns are written as empty cells. Every row must carry a
    /// valid date and a numeric (or empty) amount.
    pub fn try_save_table(&self, table: Option<&Table>) -> PfaResult<usize> {
        let transactions = match table {
            Some(table) => normalize_strict(table)?,
            None => Vec::new(),
        };
        self.try_save(&transactions)?;
        Ok(transactions.len())
    }

    /// Like [`try_save_table`](Self::try_save_table), reporting failure as `false`
    pub fn save_table(&self, table: Option<&Table>) -> bool {
        report_save(self.try_save_table(table).map(|_| ()))
    }

    /// Save typed transactions, newest first
    pub fn try_save(&self, transactions: &[Transaction]) -> PfaResult<()> {
        let mut sorted = transactions.to_vec();
        sort_newest_first(&mut sorted);

        write_csv_atomic(
            &self.path,
            CANONICAL_COLUMNS,
            sorted.iter().map(Transaction::to_cells),
        )?;
        debug!("Saved {} transactions to {}", sorted.len(), self.path.display());
        Ok(())
    }

    /// Like [`try_save`](Self::try_save), reporting failure as `false`
    pub fn save(&self, transactions: &[Transaction]) -> bool {
        report_save(self.try_save(transactions))
    }

    /// Merge an uploaded table into the stored transactions
    ///
    /// The upload must carry every canonical column (extra columns are
    /// ignored). Rows with a bad date or amount are dropped, then exact
    /// duplicates across existing and uploaded rows are removed, keeping the
    /// first occurrence. Nothing is written if the header check fails.
    pub fn append_upload(&self, upload: &Table) -> PfaResult<UploadSummary> {
        let missing = upload.missing_columns();
        if !missing.is_empty() {
            return Err(PfaError::MissingColumns { missing });
        }

        let uploaded = normalize_lenient(upload, "uploaded");
        let mut summary = UploadSummary {
            accepted: uploaded.len(),
            dropped: upload.len() - uploaded.len(),
            ..UploadSummary::default()
        };

        let mut combined = self.try_load()?;
        combined.extend(uploaded);

        let before = combined.len();
        let mut seen = HashSet::new();
        combined.retain(|txn| seen.insert(txn.clone()));
        summary.duplicates = before - combined.len();

        self.try_save(&combined)?;
        summary.total = combined.len();
        Ok(summary)
    }

    /// Headers-only CSV for users to fill in and upload
    pub fn template_csv() -> String {
        format!("{}\n", CANONICAL_COLUMNS.join(","))
    }

    /// Write the headers-only template to `path`
    pub fn write_template<P: AsRef<Path>>(path: P) -> PfaResult<()> {
        write_csv_atomic(path, CANONICAL_COLUMNS, Vec::<[&str; 7]>::new())
    }
}

fn report_save(result: PfaResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!("Error saving transactions: {}", e);
            false
        }
    }
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Parse every row, dropping the ones that fail
fn normalize_lenient(table: &Table, source: &str) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(table.len());
    for (index, cells) in table.canonical_rows().iter().enumerate() {
        match Transaction::from_cells(cells) {
            Ok(txn) => transactions.push(txn),
            Err(e) => warn!("Dropping {} row {}: {}", source, index + 1, e),
        }
    }
    sort_newest_first(&mut transactions);
    transactions
}

/// Parse every row, failing on the first that does not parse
fn normalize_strict(table: &Table) -> PfaResult<Vec<Transaction>> {
    table
        .canonical_rows()
        .iter()
        .enumerate()
        .map(|(index, cells)| {
            Transaction::from_cells(cells)
                .map_err(|e| PfaError::Validation(format!("Row {}: {}", index + 1, e)))
        })
        .collect()
}
