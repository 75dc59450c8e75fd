//! Configuration for the two TradeWire planes.
//!
//! Both planes are configured from the process environment, with every
//! field falling back to a constant default so a bare `cargo run` brings
//! up a working local pair.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{constants, Result, TwError};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| TwError::Configuration(format!("{key}: cannot parse {raw:?}"))),
        Err(_) => Ok(default),
    }
}

// A zero-capacity hand-off queue cannot be constructed.
fn nonzero(key: &str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(TwError::Configuration(format!("{key}: must be at least 1")));
    }
    Ok(value)
}

/// Configuration for the dispatch plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Name stamped into audit records originated by this server.
    pub server_name: String,
    /// Address the HTTP surface listens on.
    pub listen_addr: String,
    /// Address of the backend transaction engine (host:port, line protocol).
    pub backend_addr: String,
    /// Base URL of the audit plane.
    pub audit_url: String,
    /// TTL for pending buy/sell intents, in seconds.
    pub pending_ttl_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            server_name: constants::DEFAULT_SERVER_NAME.to_string(),
            listen_addr: constants::DEFAULT_DISPATCH_ADDR.to_string(),
            backend_addr: constants::DEFAULT_BACKEND_ADDR.to_string(),
            audit_url: constants::DEFAULT_AUDIT_URL.to_string(),
            pending_ttl_secs: constants::PENDING_ORDER_TTL_SECS,
        }
    }
}

impl DispatchConfig {
    /// Build from `TW_SERVER_NAME`, `TW_DISPATCH_ADDR`, `TW_BACKEND_ADDR`,
    /// `TW_AUDIT_URL`, and `TW_PENDING_TTL_SECS`, defaulting each missing
    /// variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_name: env_or("TW_SERVER_NAME", constants::DEFAULT_SERVER_NAME),
            listen_addr: env_or("TW_DISPATCH_ADDR", constants::DEFAULT_DISPATCH_ADDR),
            backend_addr: env_or("TW_BACKEND_ADDR", constants::DEFAULT_BACKEND_ADDR),
            audit_url: env_or("TW_AUDIT_URL", constants::DEFAULT_AUDIT_URL),
            pending_ttl_secs: env_parse(
                "TW_PENDING_TTL_SECS",
                constants::PENDING_ORDER_TTL_SECS,
            )?,
        })
    }

    /// The pending-intent TTL as a [`Duration`].
    #[must_use]
    pub fn pending_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_ttl_secs)
    }
}

/// Configuration for the audit plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Address the HTTP surface listens on.
    pub listen_addr: String,
    /// Fixed capacity of the event log.
    pub log_capacity: usize,
    /// Bound of the producer → writer hand-off queue.
    pub queue_capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            listen_addr: constants::DEFAULT_AUDIT_ADDR.to_string(),
            log_capacity: constants::DEFAULT_EVENT_LOG_CAPACITY,
            queue_capacity: constants::DEFAULT_AUDIT_QUEUE_CAPACITY,
        }
    }
}

impl AuditConfig {
    /// Build from `TW_AUDIT_ADDR`, `TW_LOG_CAPACITY`, and
    /// `TW_QUEUE_CAPACITY`, defaulting each missing variable. The queue
    /// capacity must be at least 1.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            listen_addr: env_or("TW_AUDIT_ADDR", constants::DEFAULT_AUDIT_ADDR),
            log_capacity: env_parse("TW_LOG_CAPACITY", constants::DEFAULT_EVENT_LOG_CAPACITY)?,
            queue_capacity: nonzero(
                "TW_QUEUE_CAPACITY",
                env_parse("TW_QUEUE_CAPACITY", constants::DEFAULT_AUDIT_QUEUE_CAPACITY)?,
            )?,
        })
    }
}
