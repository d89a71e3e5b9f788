use std::fmt;

/// Final outcome of a single webhook delivery attempt.
///
/// Always returned as a value, never raised: delivery failures must not
/// propagate into the transaction acknowledgement path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint accepted the request.
    Delivered {
        status: u16,
    },

    /// The endpoint answered with an error status.
    /// The response body (capped at 1 MiB) is kept for diagnostics.
    RemoteError {
        status: u16,
        body: String,
    },

    /// The request never produced a response.
    Failed(FailureReason),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    /// HTTP status code, if a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryOutcome::Delivered { status } => Some(*status),
            DeliveryOutcome::RemoteError { status, .. } => Some(*status),
            DeliveryOutcome::Failed(_) => None,
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Delivered { status } =>
                write!(f, "delivered (status {})", status),
            DeliveryOutcome::RemoteError { status, .. } =>
                write!(f, "endpoint returned error status {}", status),
            DeliveryOutcome::Failed(reason) =>
                write!(f, "delivery failed: {}", reason),
        }
    }
}

/// Reasons why an HTTP delivery attempt produced no response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Timeout,
    Network,
    InvalidRequest,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout =>
                write!(f, "request timed out"),
            FailureReason::Network =>
                write!(f, "network error"),
            FailureReason::InvalidRequest =>
                write!(f, "request could not be constructed"),
        }
    }
}
