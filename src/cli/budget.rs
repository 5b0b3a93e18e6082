//! Budget CLI commands
//!
//! Show and edit the per-category budget, and ask the budget assistant for
//! a suggestion based on spending history.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use log::debug;

use crate::config::settings::Settings;
use crate::display::{format_budget, format_draft};
use crate::error::{PfaError, PfaResult};
use crate::models::{Bucket, Money};
use crate::services::history::{average_by_category, average_monthly_income};
use crate::services::{
    parse_budget_table, suggest_budget, BudgetDraft, BudgetRequest, OpenRouterClient,
    TextGenerator,
};
use crate::storage::Storage;

use super::parse_money_arg;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the saved budget
    Show,

    /// Set the allocation for one category
    Set {
        /// Budget category (Makanan, Transport, Belanja, Hiburan, Tabungan, Lainnya)
        category: Bucket,
        /// Amount (e.g. "1500000")
        amount: String,
    },

    /// Ask the budget assistant for a suggestion
    Suggest(SuggestArgs),

    /// Read a saved assistant reply and show the budget in it
    Parse {
        /// Text file holding the reply
        file: PathBuf,
        #[command(flatten)]
        draft: DraftArgs,
    },
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Monthly savings target
    #[arg(short, long, default_value = "0")]
    goal: String,
    /// Extra wishes for the assistant, e.g. "kurangi jajan"
    #[arg(long, default_value = "")]
    notes: String,
    /// Months of history to average (0 = all); defaults to the configured value
    #[arg(long)]
    months: Option<usize>,
    /// Print the assistant's full reply
    #[arg(long)]
    show_reply: bool,
    #[command(flatten)]
    draft: DraftArgs,
}

/// Edits applied to a draft before it is shown
#[derive(Args)]
pub struct DraftArgs {
    /// Override one category, e.g. --set Makanan=1500000
    #[arg(long = "set", value_name = "CATEGORY=AMOUNT", value_parser = parse_override)]
    overrides: Vec<(Bucket, Money)>,
    /// Save the draft as the budget
    #[arg(long)]
    save: bool,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PfaResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Show => {
            let budget = storage.budget.load();
            print!("{}", format_budget(&budget, symbol));
        }

        BudgetCommands::Set { category, amount } => {
            let amount = parse_money_arg(&amount)?;
            if amount.is_negative() {
                return Err(PfaError::Validation("Budget amount cannot be negative".into()));
            }

            let mut budget = storage.budget.try_load()?;
            budget.set(category.label(), amount);
            storage.budget.try_save(&budget)?;

            println!(
                "Budget for {} set to {}",
                category,
                amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Suggest(args) => {
            let client = OpenRouterClient::from_settings(&settings.ai)?;
            debug!("Requesting budget suggestion from {}", client.model());
            run_suggestion(storage, settings, &client, args)?;
        }

        BudgetCommands::Parse { file, draft } => {
            let reply = fs::read_to_string(&file).map_err(|e| {
                PfaError::Storage(format!("Cannot read {}: {}", file.display(), e))
            })?;
            let parsed = parse_budget_table(&reply, &Bucket::ALL);
            finish_draft(storage, symbol, BudgetDraft::from_parsed(&parsed, &Bucket::ALL), draft)?;
        }
    }

    Ok(())
}

/// Build a request from history, ask `generator`, then show or save the draft
pub fn run_suggestion(
    storage: &Storage,
    settings: &Settings,
    generator: &dyn TextGenerator,
    args: SuggestArgs,
) -> PfaResult<()> {
    let transactions = storage.transactions.load();
    let months_back = args.months.unwrap_or(settings.history_months);

    let request = BudgetRequest {
        averages: average_by_category(&transactions, &Bucket::ALL, months_back),
        monthly_income: average_monthly_income(&transactions, months_back),
        savings_goal: parse_money_arg(&args.goal)?,
        notes: args.notes,
    };

    let suggestion = suggest_budget(generator, &request, &Bucket::ALL)?;
    if args.show_reply {
        println!("{}\n", suggestion.reply.trim_end());
    }

    finish_draft(
        storage,
        settings.currency_symbol.as_str(),
        suggestion.draft,
        args.draft,
    )
}

fn finish_draft(
    storage: &Storage,
    symbol: &str,
    draft: Option<BudgetDraft>,
    args: DraftArgs,
) -> PfaResult<()> {
    let Some(mut draft) = draft else {
        println!("No budget table found in the reply. Ask again or set amounts with `pfa budget set`.");
        return Ok(());
    };

    for (bucket, amount) in args.overrides {
        draft.set(bucket, amount);
    }

    print!("{}", format_draft(&draft, symbol));

    if args.save {
        storage.budget.try_save(&draft.into_budget())?;
        println!("Budget saved.");
    } else {
        println!("Not saved. Run again with --save to keep it.");
    }
    Ok(())
}

fn parse_override(s: &str) -> Result<(Bucket, Money), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{}'", s))?;
    let bucket: Bucket = category.parse().map_err(|e| format!("{}", e))?;
    let amount = Money::parse(amount).map_err(|e| e.to_string())?;
    if amount.is_negative() {
        return Err("amount cannot be negative".into());
    }
    Ok((bucket, amount))
}
