use std::sync::Arc;

use crate::matching::{AnswerMap, DecisionEngine, QuestionBank};

pub(super) fn bank() -> Arc<QuestionBank> {
    Arc::new(QuestionBank::standard().expect("standard catalog is valid"))
}

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new(bank())
}

/// Answer map covering one catalog set in question order, plus the allergy
/// reply. Values are the symbolic option ids from the catalog.
pub(super) fn answers_for_set(
    bank: &QuestionBank,
    set_index: usize,
    values: [&str; 3],
    allergy: &str,
) -> AnswerMap {
    let set = &bank.sets()[set_index];
    let mut answers = AnswerMap::new();
    for (question, value) in set.questions.iter().zip(values) {
        answers.insert(question.id.clone(), value);
    }
    answers.insert(bank.allergy_question().id.clone(), allergy);
    answers
}
