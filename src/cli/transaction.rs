//! Transaction CLI commands
//!
//! Add, list, edit and delete single transactions, and move whole tables in
//! and out of the store as CSV.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_transaction_details, format_transaction_register, format_upload_summary,
};
use crate::error::{PfaError, PfaResult};
use crate::models::{EntryKind, PaymentMethod, Subcategory, Table};
use crate::services::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
use crate::storage::{Storage, TransactionStore};

use super::{parse_date_arg, parse_money_arg};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the money was for
        description: String,
        /// Amount (e.g. "50000" or "1,500,000")
        amount: String,
        /// Subcategory (Gaji, Bonus, Makanan, Transport, Belanja, Hiburan, Tabungan, Lainnya)
        #[arg(short, long)]
        subcategory: Subcategory,
        /// Pendapatan or Pengeluaran
        #[arg(short, long, default_value = "Pengeluaran")]
        kind: EntryKind,
        /// Cash, Debit, Credit or E-Wallet
        #[arg(short, long, default_value = "Cash")]
        method: PaymentMethod,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
        /// Only Pendapatan or Pengeluaran
        #[arg(short, long)]
        kind: Option<EntryKind>,
        /// Only this subcategory
        #[arg(short, long)]
        subcategory: Option<Subcategory>,
        /// Only this payment method
        #[arg(short, long)]
        method: Option<PaymentMethod>,
        /// Text to look for in the description
        #[arg(long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show a single transaction
    Show {
        /// Row number as shown by `txn list`
        index: usize,
    },

    /// Change fields of a transaction
    Edit {
        /// Row number as shown by `txn list`
        index: usize,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        kind: Option<EntryKind>,
        #[arg(short, long)]
        subcategory: Option<Subcategory>,
        #[arg(short, long)]
        method: Option<PaymentMethod>,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Row number as shown by `txn list`
        index: usize,
    },

    /// Append transactions from a CSV file
    Import {
        /// Path to a CSV file with the template columns
        file: PathBuf,
    },

    /// Replace every stored transaction with an edited CSV file
    Replace {
        /// Path to the edited CSV file
        file: PathBuf,
    },

    /// Print or write an empty CSV template
    Template {
        /// Write the template here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PfaResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            subcategory,
            kind,
            method,
            date,
            note,
        } => {
            let date = match date {
                Some(d) => parse_date_arg(&d)?,
                None => chrono::Local::now().date_naive(),
            };

            let txn = service.add(CreateTransactionInput {
                date,
                description,
                amount: parse_money_arg(&amount)?,
                kind,
                subcategory,
                payment_method: method,
                note,
            })?;

            println!("Saved: {}", txn);
        }

        TransactionCommands::List {
            from,
            to,
            kind,
            subcategory,
            method,
            search,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(from) = from {
                filter.start_date = Some(parse_date_arg(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_date_arg(&to)?);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }
            if let Some(subcategory) = subcategory {
                filter = filter.subcategory(subcategory);
            }
            if let Some(method) = method {
                filter = filter.payment_method(method);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }

            let rows = service.list(&filter);
            print!("{}", format_transaction_register(&rows, symbol));
        }

        TransactionCommands::Show { index } => {
            let txn = service
                .all()
                .into_iter()
                .nth(index)
                .ok_or_else(|| PfaError::transaction_not_found(format!("#{}", index)))?;
            print!("{}", format_transaction_details(index, &txn, symbol));
        }

        TransactionCommands::Edit {
            index,
            date,
            description,
            amount,
            kind,
            subcategory,
            method,
            note,
        } => {
            let input = UpdateTransactionInput {
                date: date.as_deref().map(parse_date_arg).transpose()?,
                description,
                amount: amount.as_deref().map(parse_money_arg).transpose()?,
                kind,
                subcategory,
                payment_method: method,
                note,
            };

            if input.is_empty() {
                println!("Nothing to change. Pass at least one field to edit.");
                return Ok(());
            }

            let txn = service.update(index, input)?;
            println!("Updated #{}: {}", index, txn);
        }

        TransactionCommands::Delete { index } => {
            let txn = service.delete(index)?;
            println!("Deleted: {}", txn);
        }

        TransactionCommands::Import { file } => {
            let table = read_table(&file)?;
            let summary = storage.transactions.append_upload(&table)?;
            print!("{}", format_upload_summary(&summary));
        }

        TransactionCommands::Replace { file } => {
            let table = read_table(&file)?;
            let saved = service.replace(&table)?;
            println!("Saved {} transaction(s).", saved);
        }

        TransactionCommands::Template { output } => match output {
            Some(path) => {
                TransactionStore::write_template(&path)?;
                println!("Template written to {}", path.display());
            }
            None => print!("{}", TransactionStore::template_csv()),
        },
    }

    Ok(())
}

fn read_table(path: &Path) -> PfaResult<Table> {
    let file = File::open(path).map_err(|e| {
        PfaError::Storage(format!("Cannot open {}: {}", path.display(), e))
    })?;
    Table::from_csv_reader(file)
}
