//! Audit event model.
//!
//! Every command and system event is recorded as one [`AuditEvent`]. The
//! variants mirror the five admission endpoints of the audit plane; all
//! variant fields are plain strings so that producers with missing fields
//! degrade to empty values instead of being rejected (the reference
//! contract performs no validation at admission).

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Milliseconds since the UNIX epoch, stamped at event admission.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// An immutable fact about a command or system event, retained for
/// compliance replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuditEvent {
    /// A user-issued command as received by a frontend server.
    #[serde(rename_all = "camelCase")]
    UserCommand {
        timestamp: i64,
        server: String,
        transaction_num: String,
        command: String,
        username: String,
        stock_symbol: String,
        filename: String,
        funds: String,
    },
    /// A quote returned by the quote service (posted by the backend engine).
    #[serde(rename_all = "camelCase")]
    QuoteServer {
        timestamp: i64,
        server: String,
        transaction_num: String,
        username: String,
        stock_symbol: String,
        price: String,
        quote_server_time: String,
        cryptokey: String,
    },
    /// A movement of account funds (posted by the backend engine).
    #[serde(rename_all = "camelCase")]
    AccountTransaction {
        timestamp: i64,
        server: String,
        transaction_num: String,
        action: String,
        username: String,
        funds: String,
    },
    /// An internal system event not directly triggered by a user.
    #[serde(rename_all = "camelCase")]
    SystemEvent {
        timestamp: i64,
        server: String,
        transaction_num: String,
        command: String,
        username: String,
        stock_symbol: String,
        filename: String,
        funds: String,
    },
    /// A failure observed while processing a command.
    #[serde(rename_all = "camelCase")]
    ErrorEvent {
        timestamp: i64,
        server: String,
        transaction_num: String,
        command: String,
        username: String,
        stock_symbol: String,
        filename: String,
        funds: String,
        error_message: String,
    },
}

impl AuditEvent {
    /// Admission timestamp in milliseconds since the UNIX epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::UserCommand { timestamp, .. }
            | Self::QuoteServer { timestamp, .. }
            | Self::AccountTransaction { timestamp, .. }
            | Self::SystemEvent { timestamp, .. }
            | Self::ErrorEvent { timestamp, .. } => *timestamp,
        }
    }

    /// Element name used in the XML dump schema.
    #[must_use]
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::UserCommand { .. } => "userCommand",
            Self::QuoteServer { .. } => "quoteServer",
            Self::AccountTransaction { .. } => "accountTransaction",
            Self::SystemEvent { .. } => "systemEvent",
            Self::ErrorEvent { .. } => "errorEvent",
        }
    }
}
