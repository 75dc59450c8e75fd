//! Error types for the TradeWire gateway.
//!
//! All errors use the `TW_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Session errors
//! - 2xx: Pending-order errors
//! - 3xx: Backend transport errors
//! - 4xx: Audit pipeline errors
//! - 9xx: General / internal errors
//!
//! The coded `Display` form is what lands in logs. HTTP handlers reply with
//! [`TwError::user_message`] instead, which carries the plain human-readable
//! reason the external contract expects (e.g. `"No pending sells to commit"`).

use thiserror::Error;

use crate::OrderKind;

/// Central error enum for all TradeWire operations.
#[derive(Debug, Error)]
pub enum TwError {
    // =================================================================
    // Session Errors (1xx)
    // =================================================================
    /// The user has no session; every command except LOGIN requires one.
    #[error("TW_ERR_100: User not logged in: {0}")]
    NotLoggedIn(String),

    // =================================================================
    // Pending-Order Errors (2xx)
    // =================================================================
    /// Commit or cancel was requested with nothing pending.
    #[error("TW_ERR_200: {reason}")]
    EmptyQueue { reason: String },

    /// The head intent outlived its TTL at commit time. An implicit cancel
    /// has already been sent to the backend and the head has been dropped.
    #[error("TW_ERR_201: {}", kind.expiry_message())]
    ExpiredIntent { kind: OrderKind },

    // =================================================================
    // Backend Transport Errors (3xx)
    // =================================================================
    /// The backend engine returned the failure sentinel or the round trip
    /// failed at the transport level.
    #[error("TW_ERR_300: Backend failure: {reason}")]
    BackendError { reason: String },

    // =================================================================
    // Audit Pipeline Errors (4xx)
    // =================================================================
    /// An audit event could not be delivered to the audit plane.
    #[error("TW_ERR_400: Audit plane unavailable: {reason}")]
    AuditUnavailable { reason: String },

    /// The event log reached its fixed capacity. Appends fail fast; the
    /// log never overwrites or wraps.
    #[error("TW_ERR_401: Event log capacity exhausted ({capacity} entries)")]
    LogOverflow { capacity: usize },

    /// The audit queue was closed while a producer or the consumer was
    /// still using it.
    #[error("TW_ERR_402: Audit queue closed")]
    QueueClosed,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (bad env var, unparseable value, etc.).
    #[error("TW_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("TW_ERR_901: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TwError>;

impl TwError {
    /// The plain reason surfaced to HTTP clients in a 400 body.
    ///
    /// Unlike `Display`, this carries no `TW_ERR_` code — the strings are
    /// part of the external contract and are asserted by the replay harness.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotLoggedIn(_) => {
                "must be logged in to execute any commands".to_string()
            }
            Self::EmptyQueue { reason } | Self::BackendError { reason } => reason.clone(),
            Self::ExpiredIntent { kind } => kind.expiry_message().to_string(),
            other => other.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TwError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = TwError::NotLoggedIn("alice".to_string());
        let msg = format!("{err}");
        assert!(msg.starts_with("TW_ERR_100"), "Got: {msg}");
        assert!(msg.contains("alice"));
    }

    #[test]
    fn empty_queue_user_message_is_plain() {
        let err = TwError::EmptyQueue {
            reason: "No pending sells to commit".to_string(),
        };
        assert_eq!(err.user_message(), "No pending sells to commit");
        assert!(format!("{err}").starts_with("TW_ERR_200"));
    }

    #[test]
    fn expired_intent_messages_match_contract() {
        let buy = TwError::ExpiredIntent {
            kind: OrderKind::Buy,
        };
        let sell = TwError::ExpiredIntent {
            kind: OrderKind::Sell,
        };
        assert_eq!(buy.user_message(), "Time elapsed on most recent buy request");
        assert_eq!(sell.user_message(), "Time elapsed on most recent sell");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: TwError = io.into();
        assert!(matches!(err, TwError::Io(_)));
        assert!(format!("{err}").starts_with("TW_ERR_901"));
    }

    #[test]
    fn all_errors_have_tw_err_prefix() {
        let errors: Vec<TwError> = vec![
            TwError::NotLoggedIn("bob".into()),
            TwError::ExpiredIntent {
                kind: OrderKind::Buy,
            },
            TwError::BackendError {
                reason: "Bad response from transactionserv".into(),
            },
            TwError::LogOverflow { capacity: 10 },
            TwError::QueueClosed,
            TwError::Configuration("bad port".into()),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(msg.starts_with("TW_ERR_"), "Error missing TW_ERR_ prefix: {msg}");
        }
    }
}
