//! Category labels for transactions and budgets
//!
//! Transactions carry a kind (income or expense), a subcategory and a
//! payment method. The six spending subcategories double as the budget
//! buckets. Each type parses from and renders to its persisted label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Income, EntryKind::Expense];

    /// Persisted label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Pendapatan",
            Self::Expense => "Pengeluaran",
        }
    }

    /// Look up a kind by its persisted label
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EntryKind {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Self::from_label(s).ok_or_else(|| LabelError::unknown("category", s)),
        }
    }
}

/// One of the six fixed spending buckets used for budgeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Savings,
    Other,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Food,
        Bucket::Transport,
        Bucket::Shopping,
        Bucket::Entertainment,
        Bucket::Savings,
        Bucket::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Makanan",
            Self::Transport => "Transport",
            Self::Shopping => "Belanja",
            Self::Entertainment => "Hiburan",
            Self::Savings => "Tabungan",
            Self::Other => "Lainnya",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Bucket {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let english = match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "shopping" => Some(Self::Shopping),
            "entertainment" => Some(Self::Entertainment),
            "savings" => Some(Self::Savings),
            "other" => Some(Self::Other),
            _ => None,
        };
        english
            .or_else(|| Self::from_label(s))
            .ok_or_else(|| LabelError::unknown("budget category", s))
    }
}

/// Transaction subcategory: an income source or a spending bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subcategory {
    Salary,
    Bonus,
    Spending(Bucket),
}

impl Subcategory {
    /// All subcategories in form order
    pub fn all() -> Vec<Subcategory> {
        let mut all = vec![Subcategory::Salary, Subcategory::Bonus];
        all.extend(Bucket::ALL.into_iter().map(Subcategory::Spending));
        all
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Gaji",
            Self::Bonus => "Bonus",
            Self::Spending(bucket) => bucket.label(),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all()
            .into_iter()
            .find(|sub| sub.label().eq_ignore_ascii_case(label))
    }

    /// The budget bucket, for spending subcategories
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Self::Spending(bucket) => Some(*bucket),
            _ => None,
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Subcategory {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salary" => Ok(Self::Salary),
            "bonus" => Ok(Self::Bonus),
            _ => Self::from_label(s)
                .or_else(|| s.parse::<Bucket>().ok().map(Self::Spending))
                .ok_or_else(|| LabelError::unknown("subcategory", s)),
        }
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
    EWallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Debit,
        PaymentMethod::Credit,
        PaymentMethod::EWallet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Debit => "Debit",
            Self::Credit => "Credit",
            Self::EWallet => "E-Wallet",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ewallet" | "e_wallet" => Ok(Self::EWallet),
            _ => Self::from_label(s).ok_or_else(|| LabelError::unknown("payment method", s)),
        }
    }
}

/// Error for a label that names no known value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelError {
    pub kind: &'static str,
    pub value: String,
}

impl LabelError {
    fn unknown(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for LabelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_labels() {
        assert_eq!(EntryKind::Income.label(), "Pendapatan");
        assert_eq!(EntryKind::from_label("Pengeluaran"), Some(EntryKind::Expense));
        assert_eq!("income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert!("Transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_bucket_parse_accepts_label_and_english() {
        assert_eq!("Makanan".parse::<Bucket>().unwrap(), Bucket::Food);
        assert_eq!("food".parse::<Bucket>().unwrap(), Bucket::Food);
        assert_eq!("lainnya".parse::<Bucket>().unwrap(), Bucket::Other);
        assert!("Gaji".parse::<Bucket>().is_err());
    }

    #[test]
    fn test_subcategory_bucket() {
        assert_eq!(Subcategory::from_label("Gaji"), Some(Subcategory::Salary));
        assert_eq!(
            Subcategory::from_label("Hiburan").and_then(|s| s.bucket()),
            Some(Bucket::Entertainment)
        );
        assert_eq!(Subcategory::Bonus.bucket(), None);
        assert_eq!(Subcategory::all().len(), 8);
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::EWallet.label(), "E-Wallet");
        assert_eq!("e-wallet".parse::<PaymentMethod>().unwrap(), PaymentMethod::EWallet);
        assert_eq!("ewallet".parse::<PaymentMethod>().unwrap(), PaymentMethod::EWallet);
        let err = "Cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown payment method: 'Cheque'");
    }
}
