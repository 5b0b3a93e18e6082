//! Budget suggestions from a text-generation service
//!
//! Builds a prompt from spending history, sends it to a chat-completions
//! endpoint and turns the reply into an editable [`BudgetDraft`]. The draft
//! is owned by the caller and only reaches the budget file when saved.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::settings::AiSettings;
use crate::error::{PfaError, PfaResult};
use crate::models::{Bucket, Budget, Money};

use super::parser::{parse_budget_table, ParsedBudget};

/// Shown for every service failure; details go to the log
const SERVICE_FAILURE: &str = "The budget assistant could not answer. Try again in a moment.";

/// Inputs for one suggestion
#[derive(Debug, Clone, Default)]
pub struct BudgetRequest {
    /// Historical average spend per bucket
    pub averages: BTreeMap<Bucket, f64>,
    /// Estimated monthly income
    pub monthly_income: f64,
    pub savings_goal: Money,
    /// Free-text wishes, e.g. "kurangi pengeluaran makanan"
    pub notes: String,
}

impl BudgetRequest {
    /// Render the prompt sent to the service
    pub fn prompt(&self) -> String {
        let mut prompt = String::from(
            "Kamu adalah asisten keuangan. Ini adalah pengeluaran rata-rata bulanan \
             berdasarkan data historis:\n",
        );
        for (bucket, average) in &self.averages {
            let _ = writeln!(prompt, "- {}: {}", bucket, rupiah(*average));
        }
        let _ = write!(
            prompt,
            "\nPendapatan bulan ini diperkirakan {}. Target tabungan: {}.\n",
            rupiah(self.monthly_income),
            Money::from_units(self.savings_goal.units())
        );
        if !self.notes.trim().is_empty() {
            let _ = writeln!(prompt, "{}", self.notes.trim());
        }
        let labels: Vec<&str> = Bucket::ALL.iter().map(|b| b.label()).collect();
        let _ = write!(
            prompt,
            "Buat anggaran bulanan yang masuk akal. Hanya gunakan kategori: {}. \
             Jawab dalam format tabel markdown dan gunakan Bahasa Indonesia.",
            labels.join(", ")
        );
        prompt
    }
}

/// Whole rupiah, e.g. "Rp1,250,000"
fn rupiah(value: f64) -> Money {
    Money::from_units(value.round() as i64)
}

/// Something that answers a prompt with free-form text
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> PfaResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Blocking client for an OpenRouter-style chat-completions endpoint
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from settings, reading the key from the environment
    pub fn from_settings(settings: &AiSettings) -> PfaResult<Self> {
        Ok(Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            settings.api_key()?,
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextGenerator for OpenRouterClient {
    fn generate(&self, prompt: &str) -> PfaResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Requesting budget suggestion from {}", self.endpoint);
        let response = ureq::post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(&request)
            .map_err(|e| {
                match e {
                    ureq::Error::Status(code, _) => warn!("Budget service returned status {}", code),
                    other => warn!("Budget service request failed: {}", other),
                }
                PfaError::Service(SERVICE_FAILURE.into())
            })?;

        let body: ChatResponse = response.into_json().map_err(|e| {
            warn!("Budget service reply was not understood: {}", e);
            PfaError::Service(SERVICE_FAILURE.into())
        })?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                warn!("Budget service reply had no choices");
                PfaError::Service(SERVICE_FAILURE.into())
            })
    }
}

/// One bucket of a draft
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftEntry {
    pub bucket: Bucket,
    pub amount: Money,
    pub percent: Option<f64>,
}

/// An editable budget suggestion, not yet saved
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDraft {
    entries: Vec<DraftEntry>,
}

impl BudgetDraft {
    /// Draft with every bucket in `buckets`, zero where the reply had none
    ///
    /// Returns `None` when nothing was parsed.
    pub fn from_parsed(parsed: &ParsedBudget, buckets: &[Bucket]) -> Option<Self> {
        if parsed.is_empty() {
            return None;
        }

        let entries = buckets
            .iter()
            .map(|bucket| DraftEntry {
                bucket: *bucket,
                amount: parsed
                    .amounts
                    .get(bucket)
                    .map(|v| Money::from_f64(*v))
                    .unwrap_or_default(),
                percent: parsed.percent(*bucket),
            })
            .collect();
        Some(Self { entries })
    }

    /// Override one bucket's amount
    pub fn set(&mut self, bucket: Bucket, amount: Money) {
        match self.entries.iter_mut().find(|e| e.bucket == bucket) {
            Some(entry) => entry.amount = amount,
            None => self.entries.push(DraftEntry {
                bucket,
                amount,
                percent: None,
            }),
        }
    }

    pub fn amount(&self, bucket: Bucket) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.bucket == bucket)
            .map(|e| e.amount)
    }

    pub fn entries(&self) -> &[DraftEntry] {
        &self.entries
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// The budget to store once the user accepts the draft
    pub fn into_budget(self) -> Budget {
        self.entries
            .into_iter()
            .map(|e| (e.bucket.label().to_string(), e.amount))
            .collect()
    }
}

/// A service reply and the draft read from it
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub reply: String,
    /// `None` when the reply held no readable table
    pub draft: Option<BudgetDraft>,
}

/// Ask `generator` for a budget and parse its reply
pub fn suggest_budget(
    generator: &dyn TextGenerator,
    request: &BudgetRequest,
    buckets: &[Bucket],
) -> PfaResult<Suggestion> {
    let reply = generator.generate(&request.prompt())?;
    let parsed = parse_budget_table(&reply, buckets);
    if parsed.is_empty() {
        warn!("No budget rows found in the assistant reply");
    }
    let draft = BudgetDraft::from_parsed(&parsed, buckets);
    Ok(Suggestion { reply, draft })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeGenerator {
        reply: PfaResult<String>,
        prompts: RefCell<Vec<String>>,
    }

    impl FakeGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for FakeGenerator {
        fn generate(&self, prompt: &str) -> PfaResult<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(PfaError::Service(SERVICE_FAILURE.into())),
            }
        }
    }

    fn request() -> BudgetRequest {
        let mut averages = BTreeMap::new();
        averages.insert(Bucket::Food, 250_000.0);
        averages.insert(Bucket::Transport, 0.0);
        BudgetRequest {
            averages,
            monthly_income: 5_000_000.0,
            savings_goal: Money::from_units(1_000_000),
            notes: "nabung untuk liburan".into(),
        }
    }

    #[test]
    fn test_prompt_contents() {
        let prompt = request().prompt();
        assert!(prompt.contains("- Makanan: Rp250,000"));
        assert!(prompt.contains("- Transport: Rp0"));
        assert!(prompt.contains("diperkirakan Rp5,000,000"));
        assert!(prompt.contains("Target tabungan: Rp1,000,000"));
        assert!(prompt.contains("nabung untuk liburan"));
        assert!(prompt.contains("Makanan, Transport, Belanja, Hiburan, Tabungan, Lainnya"));
        assert!(prompt.contains("tabel markdown"));
    }

    #[test]
    fn test_suggest_builds_full_draft() {
        let generator = FakeGenerator::replying("| Makanan | Rp 1.200.000 | 24% |\n| Tabungan | 1000000 | 20% |");

        let suggestion = suggest_budget(&generator, &request(), &Bucket::ALL).unwrap();
        let draft = suggestion.draft.unwrap();

        assert_eq!(generator.prompts.borrow().len(), 1);
        assert_eq!(draft.entries().len(), 6);
        assert_eq!(draft.amount(Bucket::Food), Some(Money::from_units(1_200_000)));
        assert_eq!(draft.amount(Bucket::Shopping), Some(Money::zero()));
        assert_eq!(draft.entries()[0].percent, Some(24.0));
        assert_eq!(draft.entries()[1].percent, None);
    }

    #[test]
    fn test_unreadable_reply_has_no_draft() {
        let generator = FakeGenerator::replying("Maaf, saya tidak bisa membantu.");
        let suggestion = suggest_budget(&generator, &request(), &Bucket::ALL).unwrap();
        assert!(suggestion.draft.is_none());
        assert_eq!(suggestion.reply, "Maaf, saya tidak bisa membantu.");
    }

    #[test]
    fn test_service_failure_propagates() {
        let generator = FakeGenerator {
            reply: Err(PfaError::Service("down".into())),
            prompts: RefCell::new(Vec::new()),
        };
        let err = suggest_budget(&generator, &request(), &Bucket::ALL).unwrap_err();
        assert!(matches!(err, PfaError::Service(_)));
    }

    #[test]
    fn test_edit_and_convert_draft() {
        let parsed = parse_budget_table("| Makanan | 100000 |", &Bucket::ALL);
        let mut draft = BudgetDraft::from_parsed(&parsed, &Bucket::ALL).unwrap();

        draft.set(Bucket::Savings, Money::from_units(500_000));
        assert_eq!(draft.total(), Money::from_units(600_000));

        let budget = draft.into_budget();
        assert_eq!(budget.len(), 6);
        assert_eq!(budget.get("Tabungan"), Some(Money::from_units(500_000)));
        assert_eq!(budget.get("Makanan"), Some(Money::from_units(100_000)));
        assert_eq!(budget.categories().next(), Some("Makanan"));
    }

    #[test]
    fn test_oversized_reply_amount_is_ignored() {
        let generator =
            FakeGenerator::replying("| Makanan | 99999999999999999999 |\n| Hiburan | 100 |\n");
        let draft = suggest_budget(&generator, &request(), &Bucket::ALL)
            .unwrap()
            .draft
            .unwrap();

        assert_eq!(draft.amount(Bucket::Food), Some(Money::zero()));
        assert_eq!(draft.amount(Bucket::Entertainment), Some(Money::from_units(100)));
        assert_eq!(draft.total(), Money::from_units(100));
    }

    #[test]
    fn test_empty_parse_has_no_draft() {
        assert!(BudgetDraft::from_parsed(&ParsedBudget::default(), &Bucket::ALL).is_none());
    }
}
