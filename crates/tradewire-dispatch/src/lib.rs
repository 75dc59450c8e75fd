//! # tradewire-dispatch
//!
//! **Dispatch Plane**: session registry, pending-order lifecycle, backend
//! line protocol, and the user-facing HTTP surface.
//!
//! ## Architecture
//!
//! The dispatch plane sits between HTTP clients and the backend
//! transaction engine:
//! 1. **SessionRegistry**: username → session, created on LOGIN, never evicted
//! 2. **PendingOrders**: per-session FIFO buy/sell intent queues with TTL
//! 3. **CommandDispatcher**: transaction numbering, audit emission, side effects
//! 4. **Transmitter**: fresh-dial-per-call line protocol to the backend
//! 5. **HttpAuditSink**: forwards audit records to the audit plane
//!
//! ## Command Flow
//!
//! ```text
//! HTTP → CommandDispatcher.{login,forward,place,commit,cancel}
//!      → SessionRegistry lookup → Transmitter round trip
//!      → PendingOrders mutation → AuditSink
//! ```
//!
//! Every command is assigned a process-wide strictly increasing transaction
//! number and audited **before** the backend is contacted.

pub mod audit_client;
pub mod dispatcher;
pub mod http;
pub mod pending;
pub mod session;
pub mod transmitter;
pub mod wire;

pub use audit_client::{AuditSink, HttpAuditSink};
pub use dispatcher::CommandDispatcher;
pub use http::router;
pub use pending::PendingOrders;
pub use session::{SessionRegistry, UserSession};
pub use transmitter::{Backend, Transmitter};
