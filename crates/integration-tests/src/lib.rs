//! Integration tests for custdesk.
//!
//! The tests run the real REST client and view-models against
//! [`TestServer`], an in-process axum backend serving the customer API
//! from a [`MemoryRepository`] on an ephemeral port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p custdesk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `customers_api` - Repository contract over HTTP
//! - `customer_flows` - List, profile and form view-models end to end

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use custdesk_client::{CustomerRepository, MemoryRepository, RepositoryError};
use custdesk_core::{CustomerDraft, CustomerId};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// How the backend spells record keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireKeys {
    /// `id` and `zip`.
    #[default]
    Current,
    /// `_id` and `zipCode`, as older backends send them.
    Legacy,
}

#[derive(Clone)]
struct BackendState {
    store: MemoryRepository,
    keys: WireKeys,
}

/// A customer API listening on `127.0.0.1`. Stops when dropped.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    store: MemoryRepository,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn spawn() -> std::io::Result<Self> {
        Self::spawn_with(MemoryRepository::new(), WireKeys::Current).await
    }

    /// Serve `store`, encoding records with `keys`.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn spawn_with(store: MemoryRepository, keys: WireKeys) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = router(BackendState {
            store: store.clone(),
            keys,
        });
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Test server stopped: {e}");
            }
        });

        tracing::debug!(%addr, "Test server listening");
        Ok(Self {
            addr,
            store,
            handle,
        })
    }

    /// Base URL to hand to the client.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The backing store, for seeding and inspection.
    #[must_use]
    pub const fn store(&self) -> &MemoryRepository {
        &self.store
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Routes
// ─────────────────────────────────────────────────────────────────────────────

fn router(state: BackendState) -> Router {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route(
            "/api/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

struct ApiError(RepositoryError);

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("Store error: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

async fn list_customers(State(state): State<BackendState>) -> Result<Json<Value>, ApiError> {
    let customers = state.store.list().await?;
    Ok(Json(encode(&customers, state.keys)))
}

async fn get_customer(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let customer = state.store.get(&CustomerId::new(id)).await?;
    Ok(Json(encode(&customer, state.keys)))
}

async fn create_customer(
    State(state): State<BackendState>,
    Json(draft): Json<CustomerDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let customer = state.store.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(encode(&customer, state.keys))))
}

async fn update_customer(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(draft): Json<CustomerDraft>,
) -> Result<Json<Value>, ApiError> {
    let id = CustomerId::new(id);
    state.store.update(&id, &draft).await?;
    let customer = state.store.get(&id).await?;
    Ok(Json(encode(&customer, state.keys)))
}

async fn delete_customer(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&CustomerId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

fn encode<T: serde::Serialize>(value: &T, keys: WireKeys) -> Value {
    let value = serde_json::to_value(value).unwrap_or(Value::Null);
    match keys {
        WireKeys::Current => value,
        WireKeys::Legacy => to_legacy(value),
    }
}

/// Rename `id` to `_id` on records and `zip` to `zipCode` on addresses.
fn to_legacy(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(to_legacy).collect()),
        Value::Object(record) => Value::Object(
            record
                .into_iter()
                .map(|(key, value)| match key.as_str() {
                    "id" => ("_id".to_string(), value),
                    "addresses" => (key, legacy_addresses(value)),
                    _ => (key, value),
                })
                .collect(),
        ),
        other => other,
    }
}

fn legacy_addresses(value: Value) -> Value {
    let Value::Array(addresses) = value else {
        return value;
    };
    Value::Array(
        addresses
            .into_iter()
            .map(|address| match address {
                Value::Object(fields) => Value::Object(
                    fields
                        .into_iter()
                        .map(|(key, value)| {
                            if key == "zip" {
                                ("zipCode".to_string(), value)
                            } else {
                                (key, value)
                            }
                        })
                        .collect::<Map<String, Value>>(),
                ),
                other => other,
            })
            .collect(),
    )
}
