use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use topping_match::conversation::{
    chat_router, ConversationService, ExactMatchResolver, SessionId, SessionRecord, SessionStore,
    StoreError,
};
use topping_match::matching::{FixedPicker, QuestionBank};

#[derive(Default, Clone)]
struct MemoryStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
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
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
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

fn router() -> axum::Router {
    let bank = Arc::new(QuestionBank::standard().expect("standard catalog is valid"));
    let service = Arc::new(ConversationService::new(
        bank,
        Arc::new(MemoryStore::default()),
        Arc::new(ExactMatchResolver),
        Arc::new(FixedPicker(0)),
        Duration::minutes(30),
    ));
    chat_router(service)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

async fn post_message(router: &axum::Router, session_id: &str, message: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/chat/sessions/{session_id}/messages"))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": message }).to_string()))
        .expect("request builds");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("handler responds");
    let status = response.status();
    (status, json_body(response).await)
}

#[tokio::test]
async fn full_session_lifecycle_over_http() {
    let router = router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/chat/sessions")
        .body(Body::empty())
        .expect("request builds");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let opening = json_body(response).await;
    let session_id = opening["session_id"]
        .as_str()
        .expect("session id present")
        .to_string();
    assert_eq!(opening["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(opening["question"]["id"], "favorite_animal");
    assert_eq!(opening["question"]["options"].as_array().map(Vec::len), Some(3));

    let (status, body) = post_message(&router, &session_id, "dolphin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "question");
    assert_eq!(body["question"]["id"], "favorite_color");

    let (_, body) = post_message(&router, &session_id, "pink").await;
    assert_eq!(body["question"]["id"], "favorite_season");

    let (_, body) = post_message(&router, &session_id, "in_between").await;
    assert_eq!(body["kind"], "allergy");
    assert_eq!(body["question"]["id"], "peanut_allergy");

    let (status, body) = post_message(&router, &session_id, "no").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "result");
    assert_eq!(body["recommendation"]["topping"], "sprinkles");
    assert_eq!(body["recommendation"]["allergy_adjusted"], false);
    assert!(body["message"]
        .as_str()
        .expect("final message present")
        .contains("התוספת שלך"));
}

#[tokio::test]
async fn unknown_session_maps_to_not_found() {
    let router = router();

    let (status, body) = post_message(&router, "no-such-session", "dog").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]
        .as_str()
        .expect("error message present")
        .contains("no-such-session"));
}

#[tokio::test]
async fn unmatched_free_text_returns_a_clarification() {
    let router = router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/chat/sessions")
        .body(Body::empty())
        .expect("request builds");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("handler responds");
    let opening = json_body(response).await;
    let session_id = opening["session_id"].as_str().expect("session id present");

    // ExactMatchResolver cannot map arbitrary prose.
    let (status, body) = post_message(&router, session_id, "משהו לגמרי אחר").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "clarification");
    assert_eq!(body["question"]["id"], "favorite_animal");
}
