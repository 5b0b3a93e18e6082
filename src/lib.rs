//! pfa - terminal personal finance assistant
//!
//! Records income and spending in a CSV file, keeps a monthly budget per
//! spending category, reports budget against actual spending, and can ask a
//! text-generation service to propose a budget from past spending.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, budgets, money and category labels
//! - `storage`: CSV file stores for transactions and the budget
//! - `services`: Editing, historical averages and budget suggestions
//! - `reports`: Monthly and yearly report data
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `pfa` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pfa::config::{paths::PfaPaths, settings::Settings};
//! use pfa::storage::Storage;
//!
//! let paths = PfaPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! let transactions = storage.transactions.load();
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PfaError, PfaResult};
