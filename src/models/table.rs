//! Untyped transaction table
//!
//! A `Table` is what an editor or an uploaded spreadsheet hands us: header
//! names plus rows of strings, with no promise that the canonical columns
//! are all present or in order.

use std::io::Read;

use crate::error::PfaResult;

use super::transaction::{Transaction, CANONICAL_COLUMNS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// An empty table with the canonical transaction columns
    pub fn canonical() -> Self {
        Self::new(CANONICAL_COLUMNS)
    }

    /// A canonical table holding the given transactions
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut table = Self::canonical();
        table.rows = transactions
            .iter()
            .map(|txn| txn.to_cells().to_vec())
            .collect();
        table
    }

    /// Read a CSV document into a table
    ///
    /// Header names are trimmed. Short rows are padded with empty cells.
    pub fn from_csv_reader<R: Read>(reader: R) -> PfaResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Append a row; it is padded or truncated to the header width
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column, matching trimmed header names exactly
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Canonical columns that this table lacks, in canonical order
    pub fn missing_columns(&self) -> Vec<String> {
        CANONICAL_COLUMNS
            .iter()
            .filter(|col| self.column_index(col).is_none())
            .map(|col| col.to_string())
            .collect()
    }

    /// Project every row onto the canonical columns
    ///
    /// Missing columns come back as empty cells; extra columns are dropped.
    pub fn canonical_rows(&self) -> Vec<[String; 7]> {
        let indices: Vec<Option<usize>> = CANONICAL_COLUMNS
            .iter()
            .map(|col| self.column_index(col))
            .collect();

        self.rows
            .iter()
            .map(|row| {
                std::array::from_fn(|i| {
                    indices[i]
                        .and_then(|idx| row.get(idx))
                        .cloned()
                        .unwrap_or_default()
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::{COL_AMOUNT, COL_DATE, COL_NOTE};

    #[test]
    fn test_from_csv_trims_headers_and_pads_rows() {
        let csv_data = " Tanggal ,Deskripsi, Jumlah (Rp)\n2024-01-05,Gaji\n";
        let table = Table::from_csv_reader(csv_data.as_bytes()).unwrap();

        assert_eq!(table.headers(), &["Tanggal", "Deskripsi", "Jumlah (Rp)"]);
        assert_eq!(table.rows()[0], vec!["2024-01-05", "Gaji", ""]);
    }

    #[test]
    fn test_missing_columns_in_canonical_order() {
        let table = Table::new(["Tanggal", "Deskripsi", "Jumlah (Rp)", "Kategori", "Catatan"]);
        assert_eq!(
            table.missing_columns(),
            vec!["Sub-kategori".to_string(), "Metode Pembayaran".to_string()]
        );
        assert!(Table::canonical().missing_columns().is_empty());
    }

    #[test]
    fn test_canonical_rows_reorders_and_backfills() {
        let mut table = Table::new([COL_AMOUNT, "Extra", COL_DATE]);
        table.push_row(["5000", "ignored", "2024-03-01"]);

        let rows = table.canonical_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "2024-03-01");
        assert_eq!(rows[0][2], "5000");
        assert_eq!(rows[0][1], "");
        assert_eq!(rows[0][6], "");
        assert!(table.column_index(COL_NOTE).is_none());
    }

    #[test]
    fn test_empty_document() {
        let table = Table::from_csv_reader("".as_bytes()).unwrap();
        assert!(table.headers().is_empty());
        assert!(table.is_empty());
    }
}
