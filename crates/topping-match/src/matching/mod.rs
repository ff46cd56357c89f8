//! Topping matching: the fixed question bank and the scoring/decision
//! engine that turns a completed answer map into one explainable topping.

pub mod bank;
pub mod decision;
pub mod domain;

#[cfg(test)]
mod tests;

pub use bank::{CatalogError, FixedPicker, QuestionBank, SetPicker, UniformPicker};
pub use decision::{DecisionEngine, DecisionError, Recommendation, VoteComponent};
pub use domain::{
    AllergyAnswer, AllergyOption, AllergyQuestion, AnswerMap, AnswerOption, Question, QuestionId,
    QuestionSet, Topping,
};
