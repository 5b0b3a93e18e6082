//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_history, format_monthly_report, format_yearly_report};
use crate::error::{PfaError, PfaResult};
use crate::models::{Bucket, BudgetPeriod};
use crate::reports::{available_months, available_years, MonthlyReport, YearlyReport};
use crate::services::history::{average_by_category, average_monthly_income};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Budget vs actual, spending distribution and daily heatmap for a month
    Month {
        /// Month (YYYY-MM), defaults to the latest month with data
        period: Option<String>,
    },

    /// Cash flow and spending per month for a year
    Year {
        /// Year, defaults to the latest year with data
        year: Option<i32>,
    },

    /// Average spending per category and estimated monthly income
    History {
        /// Months to look back (0 = all); defaults to the configured value
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// List the months that have transactions
    Months,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> PfaResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let transactions = storage.transactions.load();

    match cmd {
        ReportCommands::Month { period } => {
            let period = match period {
                Some(p) => BudgetPeriod::parse(&p)
                    .map_err(|e| PfaError::Parse(format!("{}. Use YYYY-MM", e)))?,
                None => available_months(&transactions)
                    .last()
                    .copied()
                    .unwrap_or_else(BudgetPeriod::current_month),
            };

            let budget = storage.budget.load();
            let report = MonthlyReport::generate(&transactions, &budget, period);
            print!("{}", format_monthly_report(&report, symbol));
        }

        ReportCommands::Year { year } => {
            let year = year
                .or_else(|| available_years(&transactions).last().copied())
                .unwrap_or_else(|| BudgetPeriod::current_month().year());

            let budget = storage.budget.load();
            let report = YearlyReport::generate(&transactions, &budget, year);
            print!("{}", format_yearly_report(&report, symbol));
        }

        ReportCommands::History { months } => {
            let months_back = months.unwrap_or(settings.history_months);
            let averages = average_by_category(&transactions, &Bucket::ALL, months_back);
            let income = average_monthly_income(&transactions, months_back);
            print!("{}", format_history(&averages, income, months_back, symbol));
        }

        ReportCommands::Months => {
            let months = available_months(&transactions);
            if months.is_empty() {
                println!("No transactions yet.");
            }
            for period in months.iter().rev() {
                println!("{}  {}", period, period.label());
            }
        }
    }

    Ok(())
}
