//! Budget text parser
//!
//! Pulls a bucket -> amount allocation out of free-form text containing a
//! markdown-style table, as returned by a text-generation service. Parsing
//! is best effort: a line that cannot be read is skipped, never an error.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Bucket, Money};

/// Alternate spellings mapped to the bucket they mean
pub const SYNONYMS: &[(&str, Bucket)] = &[
    ("food", Bucket::Food),
    ("makanan", Bucket::Food),
    ("transport", Bucket::Transport),
    ("transportasi", Bucket::Transport),
    ("shopping", Bucket::Shopping),
    ("belanja", Bucket::Shopping),
    ("entertainment", Bucket::Entertainment),
    ("hiburan", Bucket::Entertainment),
    ("savings", Bucket::Savings),
    ("tabungan", Bucket::Savings),
    ("other", Bucket::Other),
    ("misc", Bucket::Other),
    ("lainnya", Bucket::Other),
];

/// One table row that resolved to a bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedRow {
    pub bucket: Bucket,
    pub amount: f64,
    /// `None` when the row has no percent cell or it did not parse
    pub percent: Option<f64>,
}

/// Everything extracted from one reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBudget {
    pub amounts: BTreeMap<Bucket, f64>,
    pub percentages: BTreeMap<Bucket, Option<f64>>,
}

impl ParsedBudget {
    /// No row was extracted; the reply should be regenerated or edited by hand
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn percent(&self, bucket: Bucket) -> Option<f64> {
        self.percentages.get(&bucket).copied().flatten()
    }

    fn insert(&mut self, row: ParsedRow) {
        self.amounts.insert(row.bucket, row.amount);
        self.percentages.insert(row.bucket, row.percent);
    }
}

/// Parse every table row of `text`, later rows overwriting earlier ones
pub fn parse_budget_table(text: &str, allowed: &[Bucket]) -> ParsedBudget {
    let mut parsed = ParsedBudget::default();
    for row in text
        .lines()
        .filter_map(|line| parse_row(line, allowed, SYNONYMS))
    {
        parsed.insert(row);
    }
    parsed
}

/// Parse a single line of a markdown table
///
/// The first cell names the bucket; the amount is the first later cell
/// holding a digit and the percent the first later cell holding `%`.
pub fn parse_row(line: &str, allowed: &[Bucket], synonyms: &[(&str, Bucket)]) -> Option<ParsedRow> {
    if !line.trim_start().starts_with('|') || is_separator(line) {
        return None;
    }

    let cells: Vec<&str> = line.trim().split('|').map(clean_cell).collect();
    // The leading and trailing pipes leave an empty cell at each end
    let cells = cells.get(1..cells.len().saturating_sub(1))?;
    if cells.len() < 2 {
        return None;
    }

    let label = cells[0].to_lowercase();
    let bucket = match_bucket(&label, allowed, synonyms)?;

    let values = &cells[1..];
    let amount_cell = values
        .iter()
        .find(|c| c.chars().any(|ch| ch.is_ascii_digit()))?;
    let percent_cell = values.iter().find(|c| c.contains('%'));

    let amount = parse_amount(amount_cell)?;
    let percent = percent_cell.and_then(|c| parse_percent(c));

    Some(ParsedRow {
        bucket,
        amount,
        percent,
    })
}

/// A header separator such as `|---|:---:|`
fn is_separator(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

fn clean_cell(cell: &str) -> &str {
    cell.trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
}

fn match_bucket(label: &str, allowed: &[Bucket], synonyms: &[(&str, Bucket)]) -> Option<Bucket> {
    allowed
        .iter()
        .copied()
        .find(|bucket| label.contains(&bucket.label().to_lowercase()))
        .or_else(|| {
            synonyms
                .iter()
                .find(|(key, bucket)| label.contains(key) && allowed.contains(bucket))
                .map(|(_, bucket)| *bucket)
        })
}

fn currency_marks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)rp\.?|idr|\$|%|\s").expect("invalid currency regex"))
}

fn dotted_thousands() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?\d{1,3}(\.\d{3})+(,\d+)?$").expect("invalid dotted thousands regex")
    })
}

/// `Rp 1,500,000` / `1.500.000` / `Rp1.500.000,50` / `$300` -> number
fn parse_amount(raw: &str) -> Option<f64> {
    let stripped = currency_marks().replace_all(raw, "");
    let normalized = if dotted_thousands().is_match(&stripped) {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped.replace(',', "")
    };
    normalized
        .parse()
        .ok()
        .filter(|value| Money::try_from_f64(*value).is_some())
}

/// `25%` / `12.5 %` / `12,5%` -> number
fn parse_percent(raw: &str) -> Option<f64> {
    let stripped = raw.replace('%', "");
    let stripped = stripped.trim();
    let normalized = match stripped.split_once(',') {
        Some((_, frac)) if !stripped.contains('.') && frac.len() <= 2 => stripped.replacen(',', ".", 1),
        _ => stripped.replace(',', ""),
    };
    normalized.parse().ok()
}
