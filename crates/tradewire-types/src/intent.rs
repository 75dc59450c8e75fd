//! Pending order intents.
//!
//! An intent records a BUY or SELL that the backend has accepted but the
//! user has not yet committed or cancelled. Intents are immutable once
//! created; they leave the pending queue only via commit, cancel, or the
//! implicit expiry-cancel at commit time.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::OrderKind;

/// A recorded buy or sell request awaiting commit or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub kind: OrderKind,
    pub username: String,
    pub stock_symbol: String,
    /// Dollar amount as submitted by the user. Opaque pass-through on this
    /// tier; the backend engine does the accounting.
    pub amount: String,
    pub created_at: DateTime<Utc>,
}

impl OrderIntent {
    /// Create an intent stamped with the current wall clock.
    #[must_use]
    pub fn new(kind: OrderKind, username: &str, stock_symbol: &str, amount: &str) -> Self {
        Self {
            kind,
            username: username.to_string(),
            stock_symbol: stock_symbol.to_string(),
            amount: amount.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Milliseconds elapsed since the intent was created.
    #[must_use]
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.created_at).num_milliseconds()
    }

    /// Whether the intent has outlived the given TTL.
    ///
    /// Checked only at commit time; an expired intent triggers an implicit
    /// cancel instead of a commit.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age_ms() > i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
    }
}
