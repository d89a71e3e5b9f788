//! Application-service HTTP surface.
//!
//! The homeserver pushes transactions here; everything else is a stub the
//! protocol requires. Within one transaction, events are processed strictly
//! sequentially, and within one event, targets are dispatched sequentially
//! in resolver order. Receipt is always acknowledged with `200 {}` once all
//! events have been processed, regardless of delivery outcomes; a malformed
//! transaction body is rejected with a client error before any event is
//! touched.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;
use crate::resolver::Resolver;
use crate::types::{delivery_payload, Event, Transaction};

/// Shared application state.
///
/// Resolver and dispatcher are read-only after startup, so concurrent
/// transactions share them without locking.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(resolver: Resolver, dispatcher: Dispatcher) -> Self {
        Self {
            resolver: Arc::new(resolver),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Build the HTTP router for the application service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/_matrix/app/v1/transactions/{txn_id}", put(handle_transaction))
        .route("/_matrix/app/v1/rooms/{room_alias}", get(handle_room_query))
        .route("/_matrix/app/v1/users/{user_id}", get(handle_user_query))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn handle_transaction(
    State(state): State<AppState>,
    Path(txn_id): Path<String>,
    Json(transaction): Json<Transaction>,
) -> Json<Value> {
    info!(txn_id = %txn_id, events = transaction.events.len(), "transaction received");

    for event in &transaction.events {
        process_event(&state, event).await;
    }

    // Delivery failures never surface here: receipt means "processed",
    // not "all deliveries succeeded".
    Json(json!({}))
}

async fn process_event(state: &AppState, event: &Event) {
    debug!(
        event_type = %event.event_type,
        room_id = %event.room_id,
        sender = %event.sender,
        "processing event"
    );

    if !event.is_message() {
        debug!(event_type = %event.event_type, "skipping non-message event");
        return;
    }

    let targets = match state.resolver.resolve(event) {
        Ok(targets) => targets,
        Err(error) => {
            warn!(event_id = %event.event_id, error = %error, "event could not be resolved");
            return;
        }
    };

    if targets.is_empty() {
        debug!(event_id = %event.event_id, room_id = %event.room_id, "no routes matched");
        return;
    }

    for target in &targets {
        info!(
            event_id = %event.event_id,
            route = %target.name,
            url = %target.url,
            method = %target.method,
            "forwarding event"
        );

        let payload = delivery_payload(event, target);
        let outcome = state.dispatcher.send(target, &payload).await;

        if outcome.is_delivered() {
            info!(route = %target.name, url = %target.url, outcome = %outcome, "webhook delivered");
        } else {
            warn!(route = %target.name, url = %target.url, outcome = %outcome, "webhook delivery failed");
        }
    }
}

async fn handle_room_query(Path(room_alias): Path<String>) -> impl IntoResponse {
    debug!(room_alias = %room_alias, "room query");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "errcode": "M_NOT_FOUND",
            "error": format!("Room alias {} not found", room_alias),
        })),
    )
}

async fn handle_user_query(Path(user_id): Path<String>) -> impl IntoResponse {
    debug!(user_id = %user_id, "user query");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "errcode": "M_NOT_FOUND",
            "error": format!("User {} not found", user_id),
        })),
    )
}
