//! # tradewire-audit
//!
//! **Audit Plane**: typed event admission, a bounded hand-off queue, a
//! single ordered log writer, and on-demand XML snapshots.
//!
//! ## Architecture
//!
//! ```text
//! producers → AuditIngest.admit() → AuditQueue (bounded mpsc)
//!           → writer task → EventLog.append() → snapshot / retrieval
//! ```
//!
//! Admission acknowledges on enqueue, not on durable write. Exactly one
//! consumer drains the queue, so log position order equals queue arrival
//! order. The log's capacity is fixed at construction and overflow fails
//! fast — never a silent overwrite.

pub mod event_log;
pub mod http;
pub mod ingest;
pub mod xml;

pub use event_log::{EventLog, SharedEventLog};
pub use http::router;
pub use ingest::{audit_pipeline, AuditIngest};
