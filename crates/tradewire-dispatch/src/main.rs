//! Dispatch plane binary.
//!
//! Environment: `TW_DISPATCH_ADDR`, `TW_BACKEND_ADDR`, `TW_AUDIT_URL`,
//! `TW_SERVER_NAME`, `TW_PENDING_TTL_SECS`; log filtering via `RUST_LOG`.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tradewire_dispatch::{router, CommandDispatcher, HttpAuditSink, Transmitter};
use tradewire_types::{constants, DispatchConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DispatchConfig::from_env()?;
    info!(
        version = constants::VERSION,
        listen = %config.listen_addr,
        backend = %config.backend_addr,
        audit = %config.audit_url,
        ttl_secs = config.pending_ttl_secs,
        "starting dispatch plane"
    );

    let backend = Arc::new(Transmitter::new(&config.backend_addr));
    let audit = Arc::new(HttpAuditSink::new(&config.audit_url));
    let dispatcher = Arc::new(CommandDispatcher::new(&config, backend, audit));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "dispatch plane listening");
    axum::serve(listener, router(dispatcher)).await?;
    Ok(())
}
