use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::RouteConfig;

/// Event type that is eligible for webhook forwarding.
///
/// Events of any other type are accepted from the homeserver but produce no
/// deliveries.
pub const MESSAGE_EVENT_TYPE: &str = "m.room.message";

/// A single event as received from the homeserver.
///
/// Immutable once decoded. Missing envelope fields decode to empty values,
/// matching the leniency of the transaction API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub event_type: String,

    #[serde(default)]
    pub event_id: String,

    #[serde(default)]
    pub room_id: String,

    #[serde(default)]
    pub sender: String,

    /// Origin timestamp in milliseconds.
    #[serde(rename = "origin_server_ts", default)]
    pub timestamp: i64,

    /// Arbitrary event content.
    #[serde(default)]
    pub content: Map<String, Value>,
}

impl Event {
    pub fn is_message(&self) -> bool {
        self.event_type == MESSAGE_EVENT_TYPE
    }

    /// Textual body of the event, when present.
    pub fn message_body(&self) -> Option<&str> {
        self.content.get("body").and_then(Value::as_str)
    }
}

/// An ordered batch of events delivered by the homeserver in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Resolved delivery instruction for one matching route.
///
/// Built fresh per event, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
    pub method: String,
    pub send_body: bool,
    pub stop_on_match: bool,
    pub shared_secret: Option<String>,
}

impl Target {
    pub fn from_route(route: &RouteConfig) -> Self {
        Self {
            name: route.name.clone(),
            url: route.webhook_url.clone(),
            method: route.method.clone(),
            send_body: route.send_body.unwrap_or(true),
            stop_on_match: route.stop_on_match,
            shared_secret: route.shared_secret.clone(),
        }
    }
}

/// Build the JSON body delivered to a target for one event.
///
/// `message` is included only when the target requests the body and the
/// event actually has a textual one.
pub fn delivery_payload(event: &Event, target: &Target) -> Value {
    let mut payload = Map::new();
    payload.insert("event_id".to_string(), Value::String(event.event_id.clone()));
    payload.insert("room_id".to_string(), Value::String(event.room_id.clone()));
    payload.insert("sender".to_string(), Value::String(event.sender.clone()));
    payload.insert("timestamp".to_string(), Value::from(event.timestamp));
    payload.insert("content".to_string(), Value::Object(event.content.clone()));
    payload.insert("event_type".to_string(), Value::String(event.event_type.clone()));

    if target.send_body {
        if let Some(body) = event.message_body() {
            payload.insert("message".to_string(), Value::String(body.to_string()));
        }
    }

    Value::Object(payload)
}
