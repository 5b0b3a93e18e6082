//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{PfaError, PfaResult};
use crate::models::transaction::parse_date;
use crate::models::Money;

pub(crate) fn parse_date_arg(s: &str) -> PfaResult<NaiveDate> {
    parse_date(s).ok_or_else(|| {
        PfaError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

pub(crate) fn parse_money_arg(s: &str) -> PfaResult<Money> {
    Money::parse(s).map_err(|e| PfaError::Validation(e.to_string()))
}
