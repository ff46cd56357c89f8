mod policy;
mod rules;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bank::QuestionBank;
use super::domain::{AnswerMap, QuestionId, Topping};

/// Stateless engine turning a completed answer map into a topping
/// recommendation. Pure and deterministic: the same map always yields the
/// same recommendation or the same error.
pub struct DecisionEngine {
    bank: Arc<QuestionBank>,
}

impl DecisionEngine {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self { bank }
    }

    pub fn decide(&self, answers: &AnswerMap) -> Result<Recommendation, DecisionError> {
        let (votes, signals) = rules::tally_answers(answers, &self.bank)?;
        let (topping, allergy_adjusted) = policy::select_topping(&signals);
        let rationale = policy::rationale(topping, allergy_adjusted);

        Ok(Recommendation {
            topping,
            rationale,
            allergy_adjusted,
            votes,
        })
    }
}

/// Single vote in the audit trail, allowing the outcome to be explained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteComponent {
    pub question: QuestionId,
    pub value: String,
    pub topping: Topping,
}

/// Decision result handed back to the conversation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub topping: Topping,
    pub rationale: String,
    pub allergy_adjusted: bool,
    pub votes: Vec<VoteComponent>,
}

/// Validation failures for an answer map. The conversation layer must not
/// reach the engine with any of these; they are surfaced to the caller,
/// never patched with a default answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("answer map is missing the allergy answer")]
    MissingAllergyAnswer,
    #[error("answer references unknown question '{0}'")]
    UnknownQuestion(QuestionId),
    #[error("option '{value}' is not defined for question '{question}'")]
    UnknownOption { question: QuestionId, value: String },
}
