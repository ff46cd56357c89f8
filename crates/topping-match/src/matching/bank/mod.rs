mod catalog;

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use super::domain::{AllergyAnswer, AllergyQuestion, Question, QuestionId, QuestionSet};

pub const QUESTIONS_PER_SET: usize = 3;
pub const OPTIONS_PER_QUESTION: usize = 3;

/// Chooses which catalog set a conversation receives. Injectable so tests can
/// pin a specific set instead of sampling.
pub trait SetPicker: Send + Sync {
    /// Returns an index in `0..catalog_len`.
    fn pick(&self, catalog_len: usize) -> usize;
}

/// Production picker: uniform over the catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformPicker;

impl SetPicker for UniformPicker {
    fn pick(&self, catalog_len: usize) -> usize {
        rand::thread_rng().gen_range(0..catalog_len)
    }
}

/// Picker that always selects the same set, wrapping around the catalog.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl SetPicker for FixedPicker {
    fn pick(&self, catalog_len: usize) -> usize {
        self.0 % catalog_len
    }
}

/// Fixed catalog of question sets plus the allergy question singleton.
/// Read-only after construction, safe to share across conversations.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    sets: Vec<QuestionSet>,
    allergy: AllergyQuestion,
}

impl QuestionBank {
    /// Built-in booth catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_sets(catalog::standard_sets(), catalog::allergy_question())
    }

    /// Validating constructor. Any violation signals a broken deployment, so
    /// callers are expected to fail fast rather than recover.
    pub fn from_sets(
        sets: Vec<QuestionSet>,
        allergy: AllergyQuestion,
    ) -> Result<Self, CatalogError> {
        if sets.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut seen_ids: HashSet<&QuestionId> = HashSet::new();
        for (index, set) in sets.iter().enumerate() {
            if set.questions.len() != QUESTIONS_PER_SET {
                return Err(CatalogError::SetSize {
                    index,
                    found: set.questions.len(),
                    expected: QUESTIONS_PER_SET,
                });
            }

            for question in &set.questions {
                if !seen_ids.insert(&question.id) {
                    return Err(CatalogError::DuplicateQuestionId {
                        question: question.id.clone(),
                    });
                }
                validate_question(question)?;
            }
        }

        validate_allergy(&allergy)?;
        if seen_ids.contains(&allergy.id) {
            return Err(CatalogError::AllergyIdCollision {
                question: allergy.id.clone(),
            });
        }

        Ok(Self { sets, allergy })
    }

    pub fn sets(&self) -> &[QuestionSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Random draw through the injected picker. The catalog is never empty,
    /// so the draw always yields a set.
    pub fn draw(&self, picker: &dyn SetPicker) -> (usize, &QuestionSet) {
        let index = picker.pick(self.sets.len()) % self.sets.len();
        (index, &self.sets[index])
    }

    /// The fixed allergy question, identical across all conversations.
    pub fn allergy_question(&self) -> &AllergyQuestion {
        &self.allergy
    }

    /// Canonical lookup across every set in the catalog.
    pub fn find_question(&self, id: &QuestionId) -> Option<&Question> {
        self.sets
            .iter()
            .flat_map(|set| set.questions.iter())
            .find(|question| &question.id == id)
    }
}

fn validate_question(question: &Question) -> Result<(), CatalogError> {
    if question.options.len() != OPTIONS_PER_QUESTION {
        return Err(CatalogError::OptionCount {
            question: question.id.clone(),
            found: question.options.len(),
            expected: OPTIONS_PER_QUESTION,
        });
    }

    let mut values = HashSet::new();
    let mut toppings = HashSet::new();
    for option in &question.options {
        if !values.insert(option.value.as_str()) {
            return Err(CatalogError::DuplicateOptionValue {
                question: question.id.clone(),
                value: option.value.clone(),
            });
        }
        toppings.insert(option.topping);
    }

    if toppings.len() != question.options.len() {
        return Err(CatalogError::DuplicateTopping {
            question: question.id.clone(),
        });
    }

    Ok(())
}

fn validate_allergy(allergy: &AllergyQuestion) -> Result<(), CatalogError> {
    let answers: HashSet<AllergyAnswer> = allergy.options.iter().map(|option| option.answer).collect();
    let values: HashSet<&str> = allergy.options.iter().map(|option| option.value.as_str()).collect();

    if allergy.options.len() != OPTIONS_PER_QUESTION
        || answers.len() != OPTIONS_PER_QUESTION
        || values.len() != OPTIONS_PER_QUESTION
    {
        return Err(CatalogError::MalformedAllergyOptions);
    }

    Ok(())
}

/// Configuration errors raised while loading the catalog. Fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("question catalog is empty")]
    EmptyCatalog,
    #[error("set {index} has {found} questions, expected {expected}")]
    SetSize {
        index: usize,
        found: usize,
        expected: usize,
    },
    #[error("question '{question}' has {found} options, expected {expected}")]
    OptionCount {
        question: QuestionId,
        found: usize,
        expected: usize,
    },
    #[error("question '{question}' maps two options to the same topping")]
    DuplicateTopping { question: QuestionId },
    #[error("question id '{question}' appears more than once in the catalog")]
    DuplicateQuestionId { question: QuestionId },
    #[error("question '{question}' defines option value '{value}' twice")]
    DuplicateOptionValue { question: QuestionId, value: String },
    #[error("allergy question must offer yes, no, and not-sure exactly once")]
    MalformedAllergyOptions,
    #[error("allergy question id '{question}' collides with a catalog question")]
    AllergyIdCollision { question: QuestionId },
}
