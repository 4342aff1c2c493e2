#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the mock API saw for one payment request.
#[derive(Debug, Clone)]
pub struct Captured {
    pub contract_id: u64,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// A stand-in for the marketplace API. Replies with a fixed status and raw
/// body so tests can script both JSON and garbage responses.
#[derive(Clone)]
pub struct MockApi {
    pub captured: Arc<Mutex<Vec<Captured>>>,
    reply: Arc<Mutex<(u16, String)>>,
    balance: Arc<Mutex<Value>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            captured: Arc::default(),
            reply: Arc::new(Mutex::new((201, json!({"id": 1}).to_string()))),
            balance: Arc::new(Mutex::new(json!({
                "contract_balance": 1000.0,
                "contract_value": 4000.0,
                "total_paid": 3000.0,
                "total_pending_payments": 0.0,
                "can_request_payment": true
            }))),
        }
    }

    pub fn reply_with(&self, status: u16, body: impl Into<String>) {
        *self.reply.lock().unwrap() = (status, body.into());
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn payments(
    State(api): State<MockApi>,
    Path(contract_id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    api.captured.lock().unwrap().push(Captured {
        contract_id,
        authorization: header_value(&headers, header::AUTHORIZATION),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body,
    });
    let (status, body) = api.reply.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn balance(State(api): State<MockApi>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get(header::AUTHORIZATION).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authentication required"})),
        );
    }
    (StatusCode::OK, Json(api.balance.lock().unwrap().clone()))
}

/// Serves `api` on an ephemeral port and returns its base URL (`http://.../api`).
pub async fn spawn(api: MockApi) -> String {
    let app = Router::new()
        .route("/api/contracts/:id/payments/", post(payments))
        .route("/api/contracts/:id/balance/", get(balance))
        .with_state(api);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}
