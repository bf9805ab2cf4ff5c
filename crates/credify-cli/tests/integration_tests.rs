//! Integration tests for the Credify CLI screens
//!
//! Commands drive real screens through a real client against an in-process
//! axum stub, then the rendered output is checked.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use credify_cli::commands;
use credify_cli::config::OutputFormat;
use credify_cli::view::{VerifyScreen, ViewState, INVALID_CLAIM_ID};
use credify_cli::Formatter;
use credify_sdk::CredifyClient;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<AtomicUsize>,
    history: Arc<Mutex<Vec<Value>>>,
}

impl StubState {
    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn check(State(state): State<StubState>, Json(_body): Json<Value>) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "verdict": "FALSE",
        "confidence": 92,
        "explanation": "The Earth is an oblate spheroid.",
        "sources": []
    }))
}

async fn history(State(state): State<StubState>) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    Json(Value::Array(state.history.lock().unwrap().clone()))
}

async fn history_detail(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let found = state
        .history
        .lock()
        .unwrap()
        .iter()
        .find(|c| c["id"] == Value::String(id.clone()))
        .cloned();
    match found {
        Some(claim) => Json(claim).into_response(),
        None => (StatusCode::NOT_FOUND, "Claim not found").into_response(),
    }
}

async fn spawn_stub(state: StubState) -> CredifyClient {
    let app = Router::new()
        .route("/check", post(check))
        .route("/history", get(history))
        .route("/history/:id", get(history_detail))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    CredifyClient::new(&format!("http://{}", addr)).unwrap()
}

fn plain() -> Formatter {
    Formatter::new(OutputFormat::Table, false)
}

#[tokio::test]
async fn test_blank_claim_sends_nothing() {
    let state = StubState::default();
    let client = spawn_stub(state.clone()).await;
    let mut screen = VerifyScreen::new();

    assert!(!commands::submit_claim(&mut screen, "  \t", &client, &plain()).await);
    assert!(!commands::submit_claim(&mut screen, "", &client, &plain()).await);

    assert_eq!(state.requests(), 0);
    assert!(matches!(screen.state(), ViewState::Idle));
}

#[tokio::test]
async fn test_verify_renders_result_card() {
    let state = StubState::default();
    let client = spawn_stub(state.clone()).await;
    let mut screen = VerifyScreen::new();

    assert!(commands::submit_claim(&mut screen, "The Earth is flat", &client, &plain()).await);
    assert_eq!(state.requests(), 1);

    let output = plain().render_verify(&screen).unwrap();
    assert!(output.contains("✗ FALSE"));
    assert!(output.contains("\"The Earth is flat\""));
    assert!(output.contains("92%"));
    assert_eq!(output.matches('█').count(), 18);
    assert!(!output.contains("SOURCES"));
}

#[tokio::test]
async fn test_unknown_detail_id_is_not_found() {
    let state = StubState::default();
    let client = spawn_stub(state.clone()).await;

    let screen = commands::open_detail("ghost", &client, &plain()).await;

    assert_eq!(state.requests(), 1);
    assert!(matches!(screen.state(), ViewState::Success(None)));
    assert!(plain().render_detail(&screen).unwrap().contains("Claim not found"));
}

#[tokio::test]
async fn test_blank_detail_id_sends_nothing() {
    let state = StubState::default();
    let client = spawn_stub(state.clone()).await;

    let screen = commands::open_detail("   ", &client, &plain()).await;

    assert_eq!(state.requests(), 0);
    assert!(matches!(screen.state(), ViewState::Failure(message) if message == INVALID_CLAIM_ID));
}

#[tokio::test]
async fn test_empty_history_renders_call_to_action() {
    let state = StubState::default();
    let client = spawn_stub(state.clone()).await;

    let screen = commands::load_history(&client, 50, &plain()).await;
    let output = plain().render_history(&screen).unwrap();

    assert!(output.contains("No History Yet"));
    assert!(output.contains("verify <claim>"));
}

#[tokio::test]
async fn test_history_entry_opens_detail() {
    let state = StubState::default();
    state.history.lock().unwrap().push(json!({
        "id": "41",
        "claim": "Honey never spoils",
        "verdict": "TRUE",
        "confidence": 88,
        "explanation": "Sealed honey keeps for centuries.",
        "news": [{"title": "Archive", "url": "https://example.org/honey", "snippet": "Jars"}],
        "created_at": "2024-03-01T12:30:00Z"
    }));
    let client = spawn_stub(state.clone()).await;

    let history = commands::load_history(&client, 50, &plain()).await;
    let id = history.select(1).unwrap();
    assert_eq!(id, "41");

    let mut detail = commands::open_detail(&id, &client, &plain()).await;
    let output = plain().render_detail(&detail).unwrap();
    assert!(output.contains("✓ TRUE"));
    assert!(output.contains("Honey never spoils"));
    assert!(output.contains("example.org"));

    commands::navigate_detail(&mut detail, "missing", &client, &plain()).await;
    assert!(matches!(detail.state(), ViewState::Success(None)));
    assert_eq!(state.requests(), 3);
}
