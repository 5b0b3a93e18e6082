//! Transaction model
//!
//! One record per financial event, with the seven canonical fields that
//! every persisted row carries. Label fields are kept as the raw strings
//! found on disk; typed accessors interpret them.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use super::category::{Bucket, EntryKind, PaymentMethod, Subcategory};
use super::money::Money;
use super::period::BudgetPeriod;

pub const COL_DATE: &str = "Tanggal";
pub const COL_DESCRIPTION: &str = "Deskripsi";
pub const COL_AMOUNT: &str = "Jumlah (Rp)";
pub const COL_CATEGORY: &str = "Kategori";
pub const COL_SUBCATEGORY: &str = "Sub-kategori";
pub const COL_PAYMENT_METHOD: &str = "Metode Pembayaran";
pub const COL_NOTE: &str = "Catatan";

/// The fixed, ordered set of columns every transaction file has
pub const CANONICAL_COLUMNS: [&str; 7] = [
    COL_DATE,
    COL_DESCRIPTION,
    COL_AMOUNT,
    COL_CATEGORY,
    COL_SUBCATEGORY,
    COL_PAYMENT_METHOD,
    COL_NOTE,
];

/// Date format written to data files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    /// Entry kind label (`Pendapatan` / `Pengeluaran`)
    pub category: String,
    pub subcategory: String,
    pub payment_method: String,
    pub note: String,
}

impl Transaction {
    /// Create a transaction from typed labels
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        kind: EntryKind,
        subcategory: Subcategory,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: kind.label().to_string(),
            subcategory: subcategory.label().to_string(),
            payment_method: payment_method.label().to_string(),
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Build a transaction from cells in canonical column order
    ///
    /// An empty amount cell means zero. The date and a non-empty amount
    /// must parse.
    pub fn from_cells(cells: &[String; 7]) -> Result<Self, RowError> {
        let date = parse_date(&cells[0]).ok_or_else(|| RowError::Date(cells[0].clone()))?;

        let raw_amount = cells[2].trim();
        let amount = if raw_amount.is_empty() {
            Money::zero()
        } else {
            Money::parse(raw_amount).map_err(|_| RowError::Amount(cells[2].clone()))?
        };

        Ok(Self {
            date,
            description: cells[1].clone(),
            amount,
            category: cells[3].clone(),
            subcategory: cells[4].clone(),
            payment_method: cells[5].clone(),
            note: cells[6].clone(),
        })
    }

    /// Cells in canonical column order, as written to disk
    pub fn to_cells(&self) -> [String; 7] {
        [
            self.date.format(DATE_FORMAT).to_string(),
            self.description.clone(),
            self.amount.to_plain_string(),
            self.category.clone(),
            self.subcategory.clone(),
            self.payment_method.clone(),
            self.note.clone(),
        ]
    }

    pub fn kind(&self) -> Option<EntryKind> {
        EntryKind::from_label(&self.category)
    }

    pub fn is_income(&self) -> bool {
        self.kind() == Some(EntryKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == Some(EntryKind::Expense)
    }

    pub fn subcategory(&self) -> Option<Subcategory> {
        Subcategory::from_label(&self.subcategory)
    }

    /// The spending bucket named by the subcategory, if any
    pub fn bucket(&self) -> Option<Bucket> {
        Bucket::from_label(&self.subcategory)
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_label(&self.payment_method)
    }

    /// The calendar month this transaction falls in
    pub fn period(&self) -> BudgetPeriod {
        BudgetPeriod::containing(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}/{})",
            self.date.format(DATE_FORMAT),
            self.description,
            self.amount,
            self.category,
            self.subcategory
        )
    }
}

/// Why a row could not become a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    Date(String),
    Amount(String),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(value) => write!(f, "invalid date '{}'", value),
            Self::Amount(value) => write!(f, "invalid amount '{}'", value),
        }
    }
}

impl std::error::Error for RowError {}

/// Parse a date using the spellings found in hand-made spreadsheets
///
/// A trailing time of day (as written by some exporters) is discarded.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: [&str; 7]) -> [String; 7] {
        values.map(String::from)
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_date("2024-01-05"), expected);
        assert_eq!(parse_date("2024/01/05"), expected);
        assert_eq!(parse_date("05/01/2024"), expected);
        assert_eq!(parse_date("2024-01-05 00:00:00"), expected);
        assert_eq!(parse_date(" 2024-01-05 "), expected);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date("kemarin"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_from_cells() {
        let txn = Transaction::from_cells(&cells([
            "2024-01-10",
            "Makan siang",
            "200000.0",
            "Pengeluaran",
            "Makanan",
            "Cash",
            "",
        ]))
        .unwrap();

        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(txn.amount, Money::from_units(200_000));
        assert!(txn.is_expense());
        assert_eq!(txn.bucket(), Some(Bucket::Food));
        assert_eq!(txn.payment_method(), Some(PaymentMethod::Cash));
    }

    #[test]
    fn test_from_cells_empty_amount_is_zero() {
        let txn = Transaction::from_cells(&cells(["2024-01-10", "", "", "", "", "", ""])).unwrap();
        assert!(txn.amount.is_zero());
        assert_eq!(txn.kind(), None);
    }

    #[test]
    fn test_from_cells_rejects_bad_values() {
        let bad_date = Transaction::from_cells(&cells(["nope", "x", "1", "", "", "", ""]));
        assert_eq!(bad_date, Err(RowError::Date("nope".into())));

        let bad_amount = Transaction::from_cells(&cells(["2024-01-10", "x", "banyak", "", "", "", ""]));
        assert_eq!(bad_amount, Err(RowError::Amount("banyak".into())));
    }

    #[test]
    fn test_cells_round_trip() {
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            "Belanja bulanan",
            Money::from_units(300_000),
            EntryKind::Expense,
            Subcategory::Spending(Bucket::Shopping),
            PaymentMethod::Debit,
        )
        .with_note("supermarket");

        let written = txn.to_cells();
        assert_eq!(written[0], "2024-02-02");
        assert_eq!(written[2], "300000.00");
        assert_eq!(written[3], "Pengeluaran");
        assert_eq!(Transaction::from_cells(&written).unwrap(), txn);
    }
}
