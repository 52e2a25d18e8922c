use crate::dbs::LocalDatabase;
use crate::gemini::{GenerateError, GreetingGenerator};
use crate::{AppState, init};
use async_openai::error::OpenAIError;
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use shared::models::Character;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// Canned generator standing in for the Gemini client. Counts invocations
/// so tests can assert the idempotency guard short-circuits before it.
pub(crate) struct StubGenerator {
    phrases: Vec<String>,
    calls: AtomicUsize,
    fail: bool,
}

impl StubGenerator {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GreetingGenerator for StubGenerator {
    async fn generate_greetings(
        &self,
        _character: &Character,
    ) -> Result<Vec<String>, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GenerateError::Api(OpenAIError::InvalidArgument(
                "stub failure".to_string(),
            )));
        }
        Ok(self.phrases.clone())
    }
}

pub(crate) fn test_app(phrases: Vec<&str>) -> (Router, Arc<StubGenerator>) {
    build_app(phrases, false)
}

pub(crate) fn failing_app() -> (Router, Arc<StubGenerator>) {
    build_app(vec![], true)
}

fn build_app(phrases: Vec<&str>, fail: bool) -> (Router, Arc<StubGenerator>) {
    let generator = Arc::new(StubGenerator {
        phrases: phrases.into_iter().map(str::to_string).collect(),
        calls: AtomicUsize::new(0),
        fail,
    });
    let state = AppState {
        db: Arc::new(LocalDatabase::in_memory()),
        generator: generator.clone(),
    };
    (init(state), generator)
}

pub(crate) async fn create_character(app: &Router, name: &str) {
    let body = json!({
        "name": name,
        "personality": "gruff",
        "occupation": "blacksmith",
        "age": 52
    });
    let request = Request::builder()
        .method("POST")
        .uri("/characters")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

pub(crate) async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
