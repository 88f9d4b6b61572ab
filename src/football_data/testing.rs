//! In-process stand-in for football-data.org used by the unit tests.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub token: Option<String>,
    /// When the request reached the server
    pub received_at: Instant,
}

#[derive(Default)]
struct Inner {
    /// path → (status, body); unknown paths answer 404
    routes: HashMap<String, (u16, Value)>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone)]
pub struct FakeUpstream {
    addr: SocketAddr,
    inner: Arc<Mutex<Inner>>,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        FakeUpstream { addr, inner }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

async fn handle(
    State(inner): State<Arc<Mutex<Inner>>>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let mut inner = inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        token: headers
            .get("x-auth-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        received_at: Instant::now(),
    });
    match inner.routes.get(uri.path()) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(body.clone()),
        ),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))),
    }
}
