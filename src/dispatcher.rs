//! Webhook dispatch.
//!
//! The dispatcher owns one HTTP client and performs a single delivery
//! attempt per call: serialize, sign when a shared secret is configured,
//! send under a bounded timeout, classify the result. There is no retry, no
//! queueing, and no persistence; the outcome is returned as a value and it is
//! the caller's job to log it.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DeliveryOutcome, FailureReason};
use crate::signing::{compute_signature, SIGNATURE_HEADER};
use crate::types::Target;

#[cfg(feature = "metrics")]
fn metric_inc(name: &'static str) {
    metrics::counter!(name).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn metric_inc(_name: &'static str) {}

/// Default per-delivery timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Response bodies are read up to this cap regardless of declared length.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Sends delivery payloads to webhook endpoints.
///
/// Cheap to share behind an `Arc`; the underlying client pools connections.
/// The timeout is fixed at construction and applies to the whole request,
/// including connection setup and body read.
pub struct Dispatcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(timeout: Duration) -> Self {
        let timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Dispatch one payload to one target.
    ///
    /// Never returns an error to the caller; every failure mode is folded
    /// into the [`DeliveryOutcome`].
    pub async fn send(&self, target: &Target, payload: &Value) -> DeliveryOutcome {
        let body = match serde_json::to_vec(payload) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(url = %target.url, error = %error, "failed to serialize delivery payload");
                metric_inc("webhook.delivery.invalid_request");
                return DeliveryOutcome::Failed(FailureReason::InvalidRequest);
            }
        };

        let method = if target.method.is_empty() {
            Method::POST
        } else {
            match Method::from_bytes(target.method.as_bytes()) {
                Ok(method) => method,
                Err(_) => {
                    warn!(url = %target.url, method = %target.method, "invalid HTTP method");
                    metric_inc("webhook.delivery.invalid_request");
                    return DeliveryOutcome::Failed(FailureReason::InvalidRequest);
                }
            }
        };

        debug!(url = %target.url, method = %method, signed = target.shared_secret.is_some(), "sending webhook");

        let mut request = self
            .client
            .request(method, target.url.as_str())
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json");

        // The signature covers the exact bytes that go on the wire.
        if let Some(secret) = target.shared_secret.as_deref() {
            request = request.header(SIGNATURE_HEADER, compute_signature(secret, &body));
        }

        let response = match request.body(body).send().await {
            Ok(response) => response,
            Err(error) => {
                let reason = if error.is_timeout() {
                    FailureReason::Timeout
                } else if error.is_builder() {
                    FailureReason::InvalidRequest
                } else {
                    FailureReason::Network
                };
                warn!(url = %target.url, error = %error, "webhook delivery failed");
                metric_inc("webhook.delivery.failed");
                return DeliveryOutcome::Failed(reason);
            }
        };

        let status = response.status().as_u16();
        let body = read_body_capped(response).await;

        if status >= 400 {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(url = %target.url, status, body = %body, "webhook endpoint returned error");
            metric_inc("webhook.delivery.remote_error");
            DeliveryOutcome::RemoteError { status, body }
        } else {
            debug!(url = %target.url, status, "webhook delivered");
            metric_inc("webhook.delivery.delivered");
            DeliveryOutcome::Delivered { status }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Drain the response body up to [`MAX_RESPONSE_BYTES`].
///
/// A read error mid-body yields whatever was received so far; the status
/// line already arrived and decides the outcome.
async fn read_body_capped(mut response: reqwest::Response) -> Vec<u8> {
    let mut body = Vec::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        let remaining = MAX_RESPONSE_BYTES - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    body
}
