use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::resolver::{match_option, OptionResolver, ResolveError};
use super::session::{ConversationPhase, SessionId, SessionRecord, SessionStore, StoreError};
use crate::matching::{
    AllergyQuestion, AnswerMap, DecisionEngine, DecisionError, Question, QuestionBank,
    Recommendation, SetPicker,
};

/// Fixed Hebrew opening, sent as three separate bubbles.
const OPENING_MESSAGES: [&str; 3] = [
    "היי! 👋 ברוכים הבאים לדוכן!",
    "אני העוזר לגלידות מותאמות אישית – מבוסס בינה מלאכותית 🤖",
    "אחרי מענה על 3 שאלות קצרות, אמצא לך את התוספת המתוקה המושלמת לגלידה! ✨",
];

const CLARIFY_MESSAGE: &str = "לא הצלחתי להבין את התשובה 🙈 אפשר לבחור אחת מהאפשרויות?";

/// Number of scored questions plus the allergy question.
const TOTAL_STEPS: usize = 4;

/// Drives one kiosk conversation: draws the question set, walks the visitor
/// through it, delegates free text to the option resolver, and invokes the
/// decision engine exactly once at the end.
pub struct ConversationService<S, R> {
    bank: Arc<QuestionBank>,
    engine: DecisionEngine,
    store: Arc<S>,
    resolver: Arc<R>,
    picker: Arc<dyn SetPicker>,
    idle_timeout: Duration,
}

impl<S, R> ConversationService<S, R>
where
    S: SessionStore + 'static,
    R: OptionResolver + 'static,
{
    pub fn new(
        bank: Arc<QuestionBank>,
        store: Arc<S>,
        resolver: Arc<R>,
        picker: Arc<dyn SetPicker>,
        idle_timeout: Duration,
    ) -> Self {
        let engine = DecisionEngine::new(bank.clone());
        Self {
            bank,
            engine,
            store,
            resolver,
            picker,
            idle_timeout,
        }
    }

    /// Opens a session: evicts stale ones, draws a set, stores the record,
    /// and returns the opening bubbles plus the first question.
    pub async fn start(&self) -> Result<ConversationOpening, ConversationError> {
        self.sweep_idle()?;

        let (set_index, set) = self.bank.draw(self.picker.as_ref());
        let session_id = SessionId(Uuid::new_v4().to_string());
        let record = SessionRecord {
            session_id: session_id.clone(),
            questions: set.clone(),
            answers: AnswerMap::new(),
            phase: ConversationPhase::AwaitingAnswer { index: 0 },
            recommendation: None,
            last_activity: Utc::now(),
        };
        let question = QuestionView::from_question(&record.questions.questions[0], 1);
        self.store.insert(record)?;

        info!(%session_id, set_index, "conversation started");

        Ok(ConversationOpening {
            session_id,
            messages: OPENING_MESSAGES.iter().map(|m| m.to_string()).collect(),
            question,
        })
    }

    /// Advances the conversation with one visitor message.
    pub async fn reply(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<BotReply, ConversationError> {
        self.sweep_idle()?;

        let mut record = self
            .store
            .fetch(session_id)?
            .ok_or_else(|| ConversationError::UnknownSession(session_id.clone()))?;

        let reply = match record.phase {
            ConversationPhase::AwaitingAnswer { index } => {
                self.handle_answer(&mut record, index, text).await?
            }
            ConversationPhase::AwaitingAllergy => self.handle_allergy(&mut record, text)?,
            ConversationPhase::Completed => replay_result(&record)?,
        };

        record.last_activity = Utc::now();
        self.store.update(record)?;

        Ok(reply)
    }

    async fn handle_answer(
        &self,
        record: &mut SessionRecord,
        index: usize,
        text: &str,
    ) -> Result<BotReply, ConversationError> {
        let question = record.questions.questions[index].clone();
        let resolved = match match_option(&question, text) {
            Some(option) => Some(option.value.clone()),
            None => self.resolve_free_text(&question, text).await?,
        };

        let Some(value) = resolved else {
            return Ok(BotReply::Clarification {
                message: CLARIFY_MESSAGE.to_string(),
                question: QuestionView::from_question(&question, index + 1),
            });
        };

        record.answers.insert(question.id.clone(), value);

        let next = index + 1;
        if next < record.questions.questions.len() {
            record.phase = ConversationPhase::AwaitingAnswer { index: next };
            Ok(BotReply::Question {
                question: QuestionView::from_question(&record.questions.questions[next], next + 1),
            })
        } else {
            record.phase = ConversationPhase::AwaitingAllergy;
            Ok(BotReply::Allergy {
                question: QuestionView::from_allergy(self.bank.allergy_question()),
            })
        }
    }

    /// The allergy gate is safety-relevant, so only literal option matches
    /// are accepted here; free text is never sent to the remote resolver.
    fn handle_allergy(
        &self,
        record: &mut SessionRecord,
        text: &str,
    ) -> Result<BotReply, ConversationError> {
        let allergy = self.bank.allergy_question();
        let needle = text.trim();
        let matched = allergy
            .options
            .iter()
            .find(|option| option.value.eq_ignore_ascii_case(needle) || option.label == needle);

        let Some(option) = matched else {
            return Ok(BotReply::Clarification {
                message: CLARIFY_MESSAGE.to_string(),
                question: QuestionView::from_allergy(allergy),
            });
        };

        record.answers.insert(allergy.id.clone(), option.value.clone());

        let recommendation = self.engine.decide(&record.answers)?;
        record.phase = ConversationPhase::Completed;
        record.recommendation = Some(recommendation.clone());

        info!(
            session_id = %record.session_id,
            topping = ?recommendation.topping,
            allergy_adjusted = recommendation.allergy_adjusted,
            "conversation completed"
        );

        Ok(BotReply::Result {
            message: final_message(&recommendation),
            recommendation,
        })
    }

    async fn resolve_free_text(
        &self,
        question: &Question,
        text: &str,
    ) -> Result<Option<String>, ConversationError> {
        let candidate = self.resolver.resolve(question, text).await?;

        // The resolver's output counts only if it names a canonical option.
        Ok(candidate.and_then(|value| question.option(&value).map(|option| option.value.clone())))
    }

    fn sweep_idle(&self) -> Result<(), ConversationError> {
        let cutoff = Utc::now() - self.idle_timeout;
        let evicted = self.store.evict_idle(cutoff)?;
        if evicted > 0 {
            debug!(evicted, "idle sessions evicted");
        }
        Ok(())
    }
}

fn replay_result(record: &SessionRecord) -> Result<BotReply, ConversationError> {
    let recommendation = record
        .recommendation
        .clone()
        .ok_or_else(|| ConversationError::CorruptSession(record.session_id.clone()))?;

    Ok(BotReply::Result {
        message: final_message(&recommendation),
        recommendation,
    })
}

fn final_message(recommendation: &Recommendation) -> String {
    format!(
        "✨ התוספת שלך: {}!\n{}\nאנא הציגו את המסך בדוכן לקבלת התוספת. בתיאבון! 😋",
        recommendation.topping.label(),
        recommendation.rationale
    )
}

/// Client-facing rendering of a question and its answer buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub prompt: String,
    /// 1-based position in the four-step flow.
    pub step: usize,
    pub total_steps: usize,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
}

impl QuestionView {
    fn from_question(question: &Question, step: usize) -> Self {
        Self {
            id: question.id.0.clone(),
            prompt: question.prompt.clone(),
            step,
            total_steps: TOTAL_STEPS,
            options: question
                .options
                .iter()
                .map(|option| OptionView {
                    value: option.value.clone(),
                    label: option.label.clone(),
                })
                .collect(),
        }
    }

    fn from_allergy(question: &AllergyQuestion) -> Self {
        Self {
            id: question.id.0.clone(),
            prompt: question.prompt.clone(),
            step: TOTAL_STEPS,
            total_steps: TOTAL_STEPS,
            options: question
                .options
                .iter()
                .map(|option| OptionView {
                    value: option.value.clone(),
                    label: option.label.clone(),
                })
                .collect(),
        }
    }
}

/// Payload returned when a session is opened.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationOpening {
    pub session_id: SessionId,
    pub messages: Vec<String>,
    pub question: QuestionView,
}

/// One bot turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BotReply {
    Question {
        question: QuestionView,
    },
    Allergy {
        question: QuestionView,
    },
    Clarification {
        message: String,
        question: QuestionView,
    },
    Result {
        message: String,
        recommendation: Recommendation,
    },
}

/// Error raised by the conversation service.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("unknown session '{0}'")]
    UnknownSession(SessionId),
    #[error("session '{0}' is completed but has no stored recommendation")]
    CorruptSession(SessionId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
}
