//! Transaction display formatting

use tabled::Tabled;

use crate::models::transaction::DATE_FORMAT;
use crate::models::Transaction;
use crate::storage::UploadSummary;

use super::{render_table, truncate};

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Tanggal")]
    date: String,
    #[tabled(rename = "Deskripsi")]
    description: String,
    #[tabled(rename = "Jumlah")]
    amount: String,
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Sub-kategori")]
    subcategory: String,
    #[tabled(rename = "Metode")]
    payment_method: String,
    #[tabled(rename = "Catatan")]
    note: String,
}

/// Format indexed transactions as a register table
///
/// The index is the row's position in the stored table, as used by
/// `txn edit` and `txn delete`.
pub fn format_transaction_register(rows: &[(usize, Transaction)], symbol: &str) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let table_rows = rows
        .iter()
        .map(|(index, txn)| RegisterRow {
            index: *index,
            date: txn.date.format(DATE_FORMAT).to_string(),
            description: truncate(&txn.description, 30),
            amount: txn.amount.format_with_symbol(symbol),
            category: txn.category.clone(),
            subcategory: txn.subcategory.clone(),
            payment_method: txn.payment_method.clone(),
            note: truncate(&txn.note, 24),
        })
        .collect();

    let mut output = render_table(table_rows);
    output.push_str(&format!("{} transaction(s)\n", rows.len()));
    output
}

/// Format one transaction on labelled lines
pub fn format_transaction_details(index: usize, txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction #{}\n", index));
    output.push_str(&format!("Date:        {}\n", txn.date.format(DATE_FORMAT)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Subcategory: {}\n", txn.subcategory));
    output.push_str(&format!("Payment:     {}\n", txn.payment_method));

    if !txn.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", txn.note));
    }

    output
}

pub fn format_upload_summary(summary: &UploadSummary) -> String {
    let mut output = format!(
        "Imported {} new transaction(s); {} now stored.\n",
        summary.added(),
        summary.total
    );
    if summary.dropped > 0 {
        output.push_str(&format!(
            "Skipped {} row(s) with an invalid date or amount.\n",
            summary.dropped
        ));
    }
    if summary.duplicates > 0 {
        output.push_str(&format!("Removed {} duplicate row(s).\n", summary.duplicates));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, EntryKind, Money, PaymentMethod, Subcategory};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "Makan siang",
            Money::from_units(1_250_000),
            EntryKind::Expense,
            Subcategory::Spending(Bucket::Food),
            PaymentMethod::EWallet,
        )
    }

    #[test]
    fn test_register() {
        let out = format_transaction_register(&[(4, sample())], "Rp");
        assert!(out.contains("Tanggal"));
        assert!(out.contains("2024-01-10"));
        assert!(out.contains("Rp1,250,000"));
        assert!(out.contains("E-Wallet"));
        assert!(out.contains("1 transaction(s)"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[], "Rp"), "No transactions found.\n");
    }

    #[test]
    fn test_details_skip_empty_note() {
        let out = format_transaction_details(0, &sample(), "Rp");
        assert!(out.contains("Transaction #0"));
        assert!(!out.contains("Note:"));

        let out = format_transaction_details(0, &sample().with_note("kantor"), "Rp");
        assert!(out.contains("Note:        kantor"));
    }

    #[test]
    fn test_upload_summary() {
        let summary = UploadSummary {
            accepted: 3,
            dropped: 1,
            duplicates: 1,
            total: 10,
        };
        let out = format_upload_summary(&summary);
        assert!(out.starts_with("Imported 2 new transaction(s); 10 now stored."));
        assert!(out.contains("Skipped 1 row(s)"));
        assert!(out.contains("Removed 1 duplicate row(s)"));
    }
}
