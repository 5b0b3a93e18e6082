//! Core data models
//!
//! Transactions, the untyped tables they travel in, budget allocations and
//! the category labels both are keyed by.

pub mod budget;
pub mod category;
pub mod money;
pub mod period;
pub mod table;
pub mod transaction;

pub use budget::{Budget, BudgetEntry};
pub use category::{Bucket, EntryKind, LabelError, PaymentMethod, Subcategory};
pub use money::Money;
pub use period::BudgetPeriod;
pub use table::Table;
pub use transaction::{Transaction, CANONICAL_COLUMNS};
