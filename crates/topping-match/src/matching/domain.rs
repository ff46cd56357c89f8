use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Recommendation categories handed out at the booth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topping {
    Sprinkles,
    Coconut,
    Peanuts,
}

impl Topping {
    /// Hebrew label shown to visitors.
    pub const fn label(self) -> &'static str {
        match self {
            Topping::Sprinkles => "סוכריות צבעוניות",
            Topping::Coconut => "קוקוס",
            Topping::Peanuts => "בוטנים",
        }
    }
}

/// Identifier wrapper for catalog questions, unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One selectable answer and the topping its vote counts toward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    pub topping: Topping,
}

/// Multiple-choice question with exactly three options, each mapped to a
/// distinct topping so the tally stays a clean one-vote-per-topping count.
/// Both invariants are enforced when the catalog is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Canonical option lookup by symbolic value.
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Ordered group of three questions presented together in one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

/// The visitor's reply to the mandatory allergy question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllergyAnswer {
    Yes,
    No,
    NotSure,
}

impl AllergyAnswer {
    /// Peanuts stay off the table unless the visitor answered an explicit "no".
    pub const fn blocks_peanuts(self) -> bool {
        !matches!(self, AllergyAnswer::No)
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(AllergyAnswer::Yes),
            "no" => Some(AllergyAnswer::No),
            "not_sure" => Some(AllergyAnswer::NotSure),
            _ => None,
        }
    }
}

/// The mandatory fourth question. Never scored toward a topping; it gates
/// peanut eligibility instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<AllergyOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyOption {
    pub value: String,
    pub label: String,
    pub answer: AllergyAnswer,
}

/// Per-conversation record of question id to chosen option value. Built one
/// entry at a time by the conversation layer and consumed exactly once by the
/// decision engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap(BTreeMap<QuestionId, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question: QuestionId, value: impl Into<String>) {
        self.0.insert(question, value.into());
    }

    pub fn get(&self, question: &QuestionId) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.0.iter().map(|(id, value)| (id, value.as_str()))
    }
}
