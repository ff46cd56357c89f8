use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::{AnswerMap, QuestionSet, Recommendation};

/// Opaque identifier handed to the kiosk client when a session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ConversationPhase {
    AwaitingAnswer { index: usize },
    AwaitingAllergy,
    Completed,
}

/// Session state owned by exactly one conversation. The drawn question set
/// is copied in so a record stays self-contained for its whole lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub questions: QuestionSet,
    pub answers: AnswerMap,
    pub phase: ConversationPhase,
    pub recommendation: Option<Recommendation>,
    pub last_activity: DateTime<Utc>,
}

/// Storage abstraction so the conversation service can be exercised in
/// isolation. Eviction mechanics belong to the implementation; the service
/// supplies the idle cutoff.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<(), StoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
    fn update(&self, record: SessionRecord) -> Result<(), StoreError>;
    /// Drops sessions idle since before `cutoff`, returning how many went.
    fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;
}

/// Error enumeration for session storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
