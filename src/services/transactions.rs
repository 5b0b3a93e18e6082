//! Transaction service
//!
//! Interactive add/edit/delete on top of the transaction store. Rows are
//! addressed by their position in the loaded, newest-first table, and every
//! change rewrites the whole file.

use chrono::NaiveDate;
use log::debug;

use crate::error::{PfaError, PfaResult};
use crate::models::{EntryKind, Money, PaymentMethod, Subcategory, Table, Transaction};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    /// Inclusive; an end before the start is treated as the start
    pub end_date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub subcategory: Option<Subcategory>,
    pub payment_method: Option<PaymentMethod>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a transaction passes every set condition
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if txn.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            let end = self.start_date.map_or(end, |start| end.max(start));
            if txn.date > end {
                return false;
            }
        }
        if self.kind.is_some() && txn.kind() != self.kind {
            return false;
        }
        if self.subcategory.is_some() && txn.subcategory() != self.subcategory {
            return false;
        }
        if self.payment_method.is_some() && txn.payment_method() != self.payment_method {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !txn.description.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub kind: EntryKind,
    pub subcategory: Subcategory,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

/// Changes to apply to an existing transaction
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub kind: Option<EntryKind>,
    pub subcategory: Option<Subcategory>,
    pub payment_method: Option<PaymentMethod>,
    pub note: Option<String>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.subcategory.is_none()
            && self.payment_method.is_none()
            && self.note.is_none()
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    pub fn add(&self, input: CreateTransactionInput) -> PfaResult<Transaction> {
        let txn = Transaction::new(
            input.date,
            input.description.trim(),
            input.amount,
            input.kind,
            input.subcategory,
            input.payment_method,
        )
        .with_note(input.note.unwrap_or_default().trim());
        validate(&txn)?;

        let mut transactions = self.storage.transactions.try_load()?;
        transactions.push(txn.clone());
        self.storage.transactions.try_save(&transactions)?;

        debug!("Added transaction: {}", txn);
        Ok(txn)
    }

    /// Edit the transaction at `index`
    pub fn update(&self, index: usize, input: UpdateTransactionInput) -> PfaResult<Transaction> {
        let mut transactions = self.storage.transactions.try_load()?;
        let txn = transactions
            .get_mut(index)
            .ok_or_else(|| PfaError::transaction_not_found(format!("#{}", index)))?;

        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(kind) = input.kind {
            txn.category = kind.label().to_string();
        }
        if let Some(subcategory) = input.subcategory {
            txn.subcategory = subcategory.label().to_string();
        }
        if let Some(method) = input.payment_method {
            txn.payment_method = method.label().to_string();
        }
        if let Some(note) = input.note {
            txn.note = note.trim().to_string();
        }

        validate(txn)?;
        let updated = txn.clone();
        self.storage.transactions.try_save(&transactions)?;

        debug!("Updated transaction #{}: {}", index, updated);
        Ok(updated)
    }

    /// Remove the transaction at `index`
    pub fn delete(&self, index: usize) -> PfaResult<Transaction> {
        let mut transactions = self.storage.transactions.try_load()?;
        if index >= transactions.len() {
            return Err(PfaError::transaction_not_found(format!("#{}", index)));
        }

        let removed = transactions.remove(index);
        self.storage.transactions.try_save(&transactions)?;

        debug!("Deleted transaction #{}: {}", index, removed);
        Ok(removed)
    }

    /// Replace the whole table with an edited copy
    ///
    /// Goes through the strict save path: any bad date or amount aborts the
    /// save and leaves the stored file unchanged.
    pub fn replace(&self, table: &Table) -> PfaResult<usize> {
        self.storage.transactions.try_save_table(Some(table))
    }

    /// Transactions matching `filter`, with their table index, newest first
    pub fn list(&self, filter: &TransactionFilter) -> Vec<(usize, Transaction)> {
        let matching = self
            .storage
            .transactions
            .load()
            .into_iter()
            .enumerate()
            .filter(|(_, txn)| filter.matches(txn));

        match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    /// Every stored transaction, newest first
    pub fn all(&self) -> Vec<Transaction> {
        self.storage.transactions.load()
    }
}

fn validate(txn: &Transaction) -> PfaResult<()> {
    if txn.description.trim().is_empty() {
        return Err(PfaError::Validation("Description is required".into()));
    }
    if txn.amount.is_negative() {
        return Err(PfaError::Validation("Amount cannot be negative".into()));
    }
    if txn.kind().is_none() {
        return Err(PfaError::Validation(format!(
            "Unknown category '{}'",
            txn.category
        )));
    }
    if txn.subcategory().is_none() {
        return Err(PfaError::Validation(format!(
            "Unknown subcategory '{}'",
            txn.subcategory
        )));
    }
    if txn.payment_method().is_none() {
        return Err(PfaError::Validation(format!(
            "Unknown payment method '{}'",
            txn.payment_method
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PfaPaths;
    use crate::models::Bucket;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(on: NaiveDate, description: &str, units: i64) -> CreateTransactionInput {
        CreateTransactionInput {
            date: on,
            description: description.into(),
            amount: Money::from_units(units),
            kind: EntryKind::Expense,
            subcategory: Subcategory::Spending(Bucket::Food),
            payment_method: PaymentMethod::Cash,
            note: None,
        }
    }

    #[test]
    fn test_add_and_list_newest_first() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.add(input(date(2024, 1, 10), "Makan siang", 50_000)).unwrap();
        service.add(input(date(2024, 2, 1), "Makan malam", 80_000)).unwrap();

        let listed = service.list(&TransactionFilter::new());
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0, 0);
        assert_eq!(listed[0].1.description, "Makan malam");
    }

    #[test]
    fn test_add_rejects_empty_description() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.add(input(date(2024, 1, 10), "   ", 1)).unwrap_err();
        assert!(err.is_validation());
        assert!(service.all().is_empty());
    }

    #[test]
    fn test_update_by_index() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(date(2024, 1, 10), "Makan", 50_000)).unwrap();
        service.add(input(date(2024, 1, 20), "Kopi", 20_000)).unwrap();

        let updated = service
            .update(
                1,
                UpdateTransactionInput {
                    amount: Some(Money::from_units(55_000)),
                    payment_method: Some(PaymentMethod::EWallet),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.description, "Makan");
        let all = service.all();
        assert_eq!(all[1].amount, Money::from_units(55_000));
        assert_eq!(all[1].payment_method, "E-Wallet");
        assert_eq!(all[0].description, "Kopi");
    }

    #[test]
    fn test_update_and_delete_out_of_range() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        assert!(service
            .update(3, UpdateTransactionInput::default())
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(date(2024, 1, 10), "Makan", 50_000)).unwrap();
        service.add(input(date(2024, 1, 20), "Kopi", 20_000)).unwrap();

        let removed = service.delete(0).unwrap();
        assert_eq!(removed.description, "Kopi");
        assert_eq!(service.all().len(), 1);
    }

    #[test]
    fn test_replace_is_strict() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(date(2024, 1, 10), "Makan", 50_000)).unwrap();

        let mut table = Table::canonical();
        table.push_row(["10/01/2024", "Makan", "50000", "Pengeluaran", "Makanan", "Cash", ""]);
        table.push_row(["besok", "Typo", "1", "Pengeluaran", "Makanan", "Cash", ""]);

        assert!(service.replace(&table).unwrap_err().is_validation());
        assert_eq!(service.all().len(), 1);
    }

    #[test]
    fn test_filter() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(date(2024, 1, 10), "Makan siang", 50_000)).unwrap();
        service.add(input(date(2024, 1, 15), "Kopi", 20_000)).unwrap();
        service
            .add(CreateTransactionInput {
                kind: EntryKind::Income,
                subcategory: Subcategory::Salary,
                payment_method: PaymentMethod::Debit,
                ..input(date(2024, 1, 25), "Gaji Januari", 5_000_000)
            })
            .unwrap();

        let income = service.list(&TransactionFilter::new().kind(EntryKind::Income));
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].0, 0);

        let search = service.list(&TransactionFilter::new().search("MAKAN"));
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].0, 2);

        let range = service.list(&TransactionFilter::new().date_range(date(2024, 1, 11), date(2024, 1, 20)));
        assert_eq!(range.len(), 1);
        assert_eq!(range[0].1.description, "Kopi");

        let clamped = service.list(&TransactionFilter::new().date_range(date(2024, 1, 15), date(2024, 1, 1)));
        assert_eq!(clamped.len(), 1);

        let limited = service.list(&TransactionFilter::new().limit(2));
        assert_eq!(limited.len(), 2);
    }
}
