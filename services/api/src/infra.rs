use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use topping_match::conversation::{SessionId, SessionRecord, SessionStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Conversation-scoped storage: records live until the idle sweep drops
/// them. Nothing is persisted beyond the booth visit.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if !guard.contains_key(&record.session_id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| record.last_activity >= cutoff);
        Ok(before - guard.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use topping_match::conversation::ConversationPhase;
    use topping_match::matching::{AnswerMap, QuestionBank};

    fn record(id: &str, idle_for: Duration) -> SessionRecord {
        let bank = QuestionBank::standard().expect("standard catalog is valid");
        SessionRecord {
            session_id: SessionId(id.to_string()),
            questions: bank.sets()[0].clone(),
            answers: AnswerMap::new(),
            phase: ConversationPhase::AwaitingAnswer { index: 0 },
            recommendation: None,
            last_activity: Utc::now() - idle_for,
        }
    }

    #[test]
    fn insert_then_fetch_round_trips() {
        let store = InMemorySessionStore::default();
        store
            .insert(record("s-1", Duration::zero()))
            .expect("insert succeeds");

        let fetched = store
            .fetch(&SessionId("s-1".to_string()))
            .expect("fetch succeeds");
        assert!(fetched.is_some());

        let conflict = store.insert(record("s-1", Duration::zero()));
        assert!(matches!(conflict, Err(StoreError::Conflict)));
    }

    #[test]
    fn update_requires_an_existing_record() {
        let store = InMemorySessionStore::default();
        let result = store.update(record("missing", Duration::zero()));
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn evict_idle_drops_only_stale_sessions() {
        let store = InMemorySessionStore::default();
        store
            .insert(record("fresh", Duration::zero()))
            .expect("insert succeeds");
        store
            .insert(record("stale", Duration::minutes(45)))
            .expect("insert succeeds");

        let evicted = store
            .evict_idle(Utc::now() - Duration::minutes(30))
            .expect("eviction succeeds");

        assert_eq!(evicted, 1);
        assert!(store
            .fetch(&SessionId("fresh".to_string()))
            .expect("fetch succeeds")
            .is_some());
        assert!(store
            .fetch(&SessionId("stale".to_string()))
            .expect("fetch succeeds")
            .is_none());
    }
}
