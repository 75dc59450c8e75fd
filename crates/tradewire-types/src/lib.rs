//! # tradewire-types
//!
//! Shared types, errors, and configuration for the **TradeWire** trading
//! gateway.
//!
//! This crate is the leaf dependency of the workspace — both planes depend
//! on it. It defines:
//!
//! - **Command model**: [`CommandKind`], [`OrderKind`]
//! - **Pending orders**: [`OrderIntent`]
//! - **Audit model**: [`AuditEvent`]
//! - **Configuration**: [`DispatchConfig`], [`AuditConfig`]
//! - **Errors**: [`TwError`] with `TW_ERR_` prefix codes
//! - **Constants**: TTLs, capacities, and the backend failure sentinel

pub mod audit;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod intent;

// Re-export all primary types at crate root for ergonomic imports:
//   use tradewire_types::{AuditEvent, CommandKind, OrderIntent, TwError, ...};

pub use audit::*;
pub use command::*;
pub use config::*;
pub use error::*;
pub use intent::*;

// Constants are accessed via `tradewire_types::constants::FOO`
// (not re-exported to avoid name collisions).
