use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::conversation::resolver::{OptionResolver, ResolveError};
use crate::conversation::service::ConversationService;
use crate::conversation::session::{SessionId, SessionRecord, SessionStore, StoreError};
use crate::matching::{FixedPicker, Question, QuestionBank};

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl MemoryStore {
    pub(super) fn contains(&self, id: &SessionId) -> bool {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .contains_key(id)
    }

    pub(super) fn put(&self, record: SessionRecord) {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .insert(record.session_id.clone(), record);
    }

    pub(super) fn get(&self, id: &SessionId) -> Option<SessionRecord> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if !guard.contains_key(&record.session_id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| record.last_activity >= cutoff);
        Ok(before - guard.len())
    }
}

/// Resolver double returning a programmed value (or failure) and recording
/// whether it was consulted at all.
pub(super) struct StubResolver {
    response: Result<Option<String>, String>,
    called: AtomicBool,
}

impl StubResolver {
    pub(super) fn returning(value: &str) -> Self {
        Self {
            response: Ok(Some(value.to_string())),
            called: AtomicBool::new(false),
        }
    }

    pub(super) fn unresolved() -> Self {
        Self {
            response: Ok(None),
            called: AtomicBool::new(false),
        }
    }

    pub(super) fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            called: AtomicBool::new(false),
        }
    }

    pub(super) fn was_called(&self) -> bool {
        self.called.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl OptionResolver for StubResolver {
    async fn resolve(
        &self,
        _question: &Question,
        _text: &str,
    ) -> Result<Option<String>, ResolveError> {
        self.called.store(true, Ordering::Relaxed);
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(ResolveError::Transport(message.clone())),
        }
    }
}

pub(super) fn bank() -> Arc<QuestionBank> {
    Arc::new(QuestionBank::standard().expect("standard catalog is valid"))
}

/// Service pinned to catalog set 0 with a 30 minute idle timeout.
pub(super) fn service<R>(
    store: Arc<MemoryStore>,
    resolver: Arc<R>,
) -> ConversationService<MemoryStore, R>
where
    R: OptionResolver + 'static,
{
    ConversationService::new(
        bank(),
        store,
        resolver,
        Arc::new(FixedPicker(0)),
        Duration::minutes(30),
    )
}
