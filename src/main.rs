use anyhow::Result;
use clap::{Parser, Subcommand};

use pfa::cli::{
    handle_budget_command, handle_report_command, handle_transaction_command, BudgetCommands,
    ReportCommands, TransactionCommands,
};
use pfa::config::{paths::PfaPaths, settings::Settings};
use pfa::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PFA_LOG";

#[derive(Parser)]
#[command(
    name = "pfa",
    version,
    about = "Terminal personal finance assistant",
    long_about = "pfa records income and spending in a CSV file, keeps a monthly \
                  budget per category, compares it with what was actually spent, \
                  and can ask a budget assistant for a suggestion based on your history."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Monthly, yearly and history reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PfaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Config { save }) => {
            println!("pfa configuration");
            println!("=================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Budget file:       {}", paths.budget_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!(
                "  History months:  {}",
                if settings.history_months == 0 {
                    "all".to_string()
                } else {
                    settings.history_months.to_string()
                }
            );
            println!("  Assistant model: {}", settings.ai.model);
            println!("  Endpoint:        {}", settings.ai.endpoint);
            println!("  API key from:    ${}", settings.ai.api_key_env);

            if save {
                settings.save(&paths)?;
                println!();
                println!("Settings written to {}", paths.settings_file().display());
            }
        }
        None => {
            println!("pfa - personal finance assistant");
            println!();
            println!("Run 'pfa --help' for usage information.");
            println!("Run 'pfa txn template' to get a CSV template for importing.");
        }
    }

    Ok(())
}
