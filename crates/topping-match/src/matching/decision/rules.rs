use super::{DecisionError, VoteComponent};
use crate::matching::bank::QuestionBank;
use crate::matching::domain::{AllergyAnswer, AnswerMap, Topping};

pub(crate) struct TallySignals {
    pub sprinkles: u32,
    pub coconut: u32,
    pub peanuts: u32,
    pub allergy: AllergyAnswer,
}

/// Accumulates one vote per non-allergy answer and validates the allergy
/// reply. An unresolvable entry fails the whole tally; a silently skipped
/// vote would bias the outcome.
pub(crate) fn tally_answers(
    answers: &AnswerMap,
    bank: &QuestionBank,
) -> Result<(Vec<VoteComponent>, TallySignals), DecisionError> {
    let allergy_id = &bank.allergy_question().id;

    let allergy_value = answers
        .get(allergy_id)
        .ok_or(DecisionError::MissingAllergyAnswer)?;
    let allergy =
        AllergyAnswer::from_value(allergy_value).ok_or_else(|| DecisionError::UnknownOption {
            question: allergy_id.clone(),
            value: allergy_value.to_string(),
        })?;

    let mut votes = Vec::new();
    let mut sprinkles = 0;
    let mut coconut = 0;
    let mut peanuts = 0;

    for (question_id, value) in answers.iter() {
        if question_id == allergy_id {
            continue;
        }

        let question = bank
            .find_question(question_id)
            .ok_or_else(|| DecisionError::UnknownQuestion(question_id.clone()))?;
        let option = question
            .option(value)
            .ok_or_else(|| DecisionError::UnknownOption {
                question: question_id.clone(),
                value: value.to_string(),
            })?;

        match option.topping {
            Topping::Sprinkles => sprinkles += 1,
            Topping::Coconut => coconut += 1,
            Topping::Peanuts => peanuts += 1,
        }

        votes.push(VoteComponent {
            question: question_id.clone(),
            value: value.to_string(),
            topping: option.topping,
        });
    }

    Ok((
        votes,
        TallySignals {
            sprinkles,
            coconut,
            peanuts,
            allergy,
        },
    ))
}
