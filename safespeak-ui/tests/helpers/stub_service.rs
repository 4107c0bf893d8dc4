//! Stub remote service
//!
//! Serves `GET /get-phrase` and `POST /verify-audio` on an ephemeral port with
//! scripted replies, and records every upload it receives.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Scripted reply for the phrase endpoint
#[derive(Debug, Clone)]
pub enum PhraseReply {
    Phrase(String),
    /// 200 with no `phrase` member
    Missing,
    Status(u16),
}

/// Scripted reply for the verification endpoint
#[derive(Debug, Clone)]
pub enum VerifyReply {
    Json(Value),
    Status(u16, Value),
    /// 200 with a body that is not JSON
    Garbage,
}

/// One multipart part as the stub saw it
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: usize,
}

struct StubState {
    phrase: Mutex<PhraseReply>,
    verify: Mutex<VerifyReply>,
    phrase_hits: AtomicUsize,
    uploads: Mutex<Vec<ReceivedUpload>>,
    gated: AtomicBool,
    release: Notify,
}

pub struct StubService {
    base_url: String,
    state: Arc<StubState>,
    server: JoinHandle<()>,
}

impl StubService {
    pub async fn start(phrase: PhraseReply, verify: VerifyReply) -> Self {
        let state = Arc::new(StubState {
            phrase: Mutex::new(phrase),
            verify: Mutex::new(verify),
            phrase_hits: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
            gated: AtomicBool::new(false),
            release: Notify::new(),
        });

        let app = Router::new()
            .route("/get-phrase", get(phrase_handler))
            .route("/verify-audio", post(verify_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind stub listener");
        let addr = listener.local_addr().expect("Should have local address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            server,
        }
    }

    /// Phrase "Say hello" and a FAKE verdict with one plot
    pub async fn start_default() -> Self {
        Self::start(
            PhraseReply::Phrase("Say hello".to_string()),
            VerifyReply::Json(json!({
                "Prediction": "FAKE",
                "FeatureDistributionPlotURL": "a.png",
            })),
        )
        .await
    }

    pub fn phrase_url(&self) -> String {
        format!("{}/get-phrase", self.base_url)
    }

    pub fn verify_url(&self) -> String {
        format!("{}/verify-audio", self.base_url)
    }

    pub fn phrase_hits(&self) -> usize {
        self.state.phrase_hits.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().unwrap().clone()
    }

    pub fn set_verify_reply(&self, reply: VerifyReply) {
        *self.state.verify.lock().unwrap() = reply;
    }

    /// Hold verification replies until [`release_verification`](Self::release_verification)
    pub fn gate_verification(&self) {
        self.state.gated.store(true, Ordering::SeqCst);
    }

    /// Let one held verification reply through
    pub fn release_verification(&self) {
        self.state.release.notify_one();
    }
}

impl Drop for StubService {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn phrase_handler(State(state): State<Arc<StubState>>) -> Response {
    state.phrase_hits.fetch_add(1, Ordering::SeqCst);

    let reply = state.phrase.lock().unwrap().clone();
    match reply {
        PhraseReply::Phrase(phrase) => Json(json!({ "phrase": phrase })).into_response(),
        PhraseReply::Missing => Json(json!({})).into_response(),
        PhraseReply::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, Json(json!({ "error": "Failed to generate phrase" }))).into_response()
        }
    }
}

async fn verify_handler(State(state): State<Arc<StubState>>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let upload = ReceivedUpload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: 0,
        };
        let bytes = field.bytes().await.unwrap().len();
        state.uploads.lock().unwrap().push(ReceivedUpload { bytes, ..upload });
    }

    if state.gated.load(Ordering::SeqCst) {
        state.release.notified().await;
    }

    let reply = state.verify.lock().unwrap().clone();
    match reply {
        VerifyReply::Json(body) => Json(body).into_response(),
        VerifyReply::Status(code, body) => {
            (StatusCode::from_u16(code).unwrap(), Json(body)).into_response()
        }
        VerifyReply::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}
