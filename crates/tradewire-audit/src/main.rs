//! Audit plane binary.
//!
//! Environment: `TW_AUDIT_ADDR`, `TW_LOG_CAPACITY`, `TW_QUEUE_CAPACITY`;
//! log filtering via `RUST_LOG`.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tradewire_audit::http::AuditState;
use tradewire_audit::{audit_pipeline, event_log, router};
use tradewire_types::{constants, AuditConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AuditConfig::from_env()?;
    info!(
        version = constants::VERSION,
        listen = %config.listen_addr,
        log_capacity = config.log_capacity,
        queue_capacity = config.queue_capacity,
        "starting audit plane"
    );

    let log = event_log::shared(config.log_capacity);
    let (ingest, _writer) = audit_pipeline(Arc::clone(&log), config.queue_capacity);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "audit plane listening");
    axum::serve(listener, router(AuditState { ingest, log })).await?;
    Ok(())
}
