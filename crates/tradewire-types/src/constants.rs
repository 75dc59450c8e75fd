//! System-wide constants for the TradeWire gateway.

/// Window during which a pending buy/sell intent may still be committed,
/// in seconds. Older intents are implicitly cancelled at commit time.
pub const PENDING_ORDER_TTL_SECS: u64 = 60;

/// Fixed capacity of the audit event log (entries are pre-allocated).
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 5_000_000;

/// Bound of the audit hand-off queue between producers and the log writer.
pub const DEFAULT_AUDIT_QUEUE_CAPACITY: usize = 10_000;

/// The literal line the backend engine returns to signal failure. The sole
/// failure signal crossing the wire boundary; no structured detail exists.
pub const BACKEND_FAILURE_SENTINEL: &str = "-1";

/// Error message recorded (and surfaced) when the backend round trip fails.
pub const BAD_BACKEND_RESPONSE: &str = "Bad response from transactionserv";

/// Default listen address for the dispatch plane HTTP surface.
pub const DEFAULT_DISPATCH_ADDR: &str = "0.0.0.0:8000";

/// Default listen address for the audit plane HTTP surface.
pub const DEFAULT_AUDIT_ADDR: &str = "0.0.0.0:8001";

/// Default base URL the dispatch plane uses to reach the audit plane.
pub const DEFAULT_AUDIT_URL: &str = "http://127.0.0.1:8001";

/// Default address of the backend transaction engine (line protocol).
pub const DEFAULT_BACKEND_ADDR: &str = "127.0.0.1:4444";

/// Server name stamped into audit records by the dispatch plane.
pub const DEFAULT_SERVER_NAME: &str = "dispatch";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gateway name.
pub const GATEWAY_NAME: &str = "TradeWire";
