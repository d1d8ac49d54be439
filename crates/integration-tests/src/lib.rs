//! Integration tests for the POS register.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pos-register-integration-tests
//! ```
//!
//! The tests need no external services: [`MockBackend`] serves the
//! product/purchase API from an in-process `axum` router on an ephemeral
//! port and records every request it receives.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pos_register::{PosApiClient, RegisterConfig};
use serde_json::Value;

/// How the mock answers purchase submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseMode {
    /// Answer `200 OK`.
    Accept,
    /// Answer with the given error status.
    Reject(StatusCode),
}

#[derive(Debug)]
struct Recorded {
    catalog: HashMap<String, Value>,
    purchase_mode: PurchaseMode,
    product_queries: Vec<String>,
    purchases: Vec<Value>,
}

type Shared = Arc<Mutex<Recorded>>;

/// In-process mock of the product/purchase API.
#[derive(Debug, Clone)]
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    /// Start a mock serving `catalog`, keyed by product code.
    ///
    /// Each value is returned verbatim as the product JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(catalog: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        let state: Shared = Arc::new(Mutex::new(Recorded {
            catalog: catalog
                .into_iter()
                .map(|(code, body)| (code.to_string(), body))
                .collect(),
            purchase_mode: PurchaseMode::Accept,
            product_queries: Vec::new(),
            purchases: Vec::new(),
        }));

        let app = Router::new()
            .route("/api/product", get(product))
            .route("/api/purchase", post(purchase))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Base URL of the mock, with a trailing slash like the hosted backend.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// API client pointed at this mock.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be configured.
    #[must_use]
    pub fn client(&self) -> PosApiClient {
        let config = RegisterConfig::from_vars(|key| match key {
            "POS_API_URL" => Some(self.base_url()),
            "POS_HTTP_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .expect("Invalid mock config");
        PosApiClient::new(&config).expect("Failed to create API client")
    }

    /// Change how purchases are answered from now on.
    pub fn set_purchase_mode(&self, mode: PurchaseMode) {
        self.lock().purchase_mode = mode;
    }

    /// Every `code` query parameter received so far.
    #[must_use]
    pub fn product_queries(&self) -> Vec<String> {
        self.lock().product_queries.clone()
    }

    /// Every purchase body received so far, including rejected ones.
    #[must_use]
    pub fn purchases(&self) -> Vec<Value> {
        self.lock().purchases.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Address that refuses connections, for network failure tests.
///
/// # Panics
///
/// Panics if no local port can be reserved.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to reserve port");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{addr}/")
}

async fn product(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let code = params.get("code").cloned().unwrap_or_default();
    let mut recorded = state.lock().unwrap_or_else(PoisonError::into_inner);
    recorded.product_queries.push(code.clone());

    match recorded.catalog.get(&code) {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(serde_json::json!({"detail": "not found"})))
            .into_response(),
    }
}

async fn purchase(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut recorded = state.lock().unwrap_or_else(PoisonError::into_inner);
    recorded.purchases.push(body);

    match recorded.purchase_mode {
        PurchaseMode::Accept => (StatusCode::OK, Json(serde_json::json!({"success": true})))
            .into_response(),
        PurchaseMode::Reject(status) => status.into_response(),
    }
}
