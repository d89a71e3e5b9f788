//! A Matrix application service that forwards room events to webhooks.
//!
//! The homeserver pushes transactions (ordered batches of events) to this
//! service; a rule engine evaluates per-route boolean selectors against each
//! event and forwards a derived JSON payload to every matching destination,
//! optionally signed with HMAC-SHA256.
//!
//! ## Guarantees
//! - Selectors are compiled once at startup; a malformed selector refuses to
//!   serve rather than failing at runtime
//! - Routes are evaluated in configuration order, with per-route
//!   stop-on-match short-circuit
//! - One event's unusual shape never takes the service down: selector
//!   evaluation errors only skip the affected route
//! - Transactions are always acknowledged once processed, independent of
//!   delivery outcomes
//!
//! ## Non-Guarantees
//! - Delivery retries
//! - Persistent delivery state
//! - Event deduplication or exactly-once delivery
//! - Backpressure toward the homeserver
//!
//! Delivery is **fire-and-forget** per target: a failed webhook is logged
//! and dropped. If retry or delivery-status reporting is ever needed, layer
//! it around the [`Dispatcher`] contract instead of changing it.

pub mod args;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registration;
pub mod resolver;
pub mod selector;
pub mod server;
pub mod signing;
pub mod types;

pub use args::Args;
pub use config::{Config, ConfigError, RouteConfig};
pub use dispatcher::{Dispatcher, DEFAULT_TIMEOUT, MAX_RESPONSE_BYTES};
pub use error::{DeliveryOutcome, FailureReason};
pub use registration::{Registration, RegistrationError};
pub use resolver::{Resolver, RouteCompileError};
pub use selector::{CompileError, EvalError, Selector};
pub use server::{router, AppState};
pub use signing::{compute_signature, verify_signature, SIGNATURE_HEADER};
pub use types::{delivery_payload, Event, Target, Transaction, MESSAGE_EVENT_TYPE};
