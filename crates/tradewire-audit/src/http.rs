//! HTTP surface of the audit plane.
//!
//! Admission endpoints take the event's fields as query parameters and
//! reply `"OK"` once the event is queued. Missing parameters become empty
//! strings — admission performs no validation, matching the reference
//! contract. `/dumpLog` snapshots the log synchronously; `/dumpLogRetrieve`
//! streams back a previously written file.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use tracing::{info, warn};

use tradewire_types::{now_ms, AuditEvent};

use crate::event_log::SharedEventLog;
use crate::ingest::AuditIngest;

/// Shared handler state: the producer handle plus the log for snapshots.
#[derive(Clone)]
pub struct AuditState {
    pub ingest: AuditIngest,
    pub log: SharedEventLog,
}

/// Union of every query parameter an admission endpoint may carry.
/// Absent parameters default to empty, by contract.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParams {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub transaction_num: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub stock_symbol: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub funds: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quote_server_time: String,
    #[serde(default)]
    pub cryptokey: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub error_message: String,
}

async fn admit(state: &AuditState, event: AuditEvent) -> Response {
    match state.ingest.admit(event).await {
        Ok(()) => "OK".into_response(),
        Err(err) => {
            warn!(%err, "admission failed");
            (StatusCode::SERVICE_UNAVAILABLE, err.user_message()).into_response()
        }
    }
}

async fn user_command(State(state): State<AuditState>, Query(p): Query<EventParams>) -> Response {
    admit(
        &state,
        AuditEvent::UserCommand {
            timestamp: now_ms(),
            server: p.server,
            transaction_num: p.transaction_num,
            command: p.command,
            username: p.username,
            stock_symbol: p.stock_symbol,
            filename: p.filename,
            funds: p.funds,
        },
    )
    .await
}

async fn quote_server(State(state): State<AuditState>, Query(p): Query<EventParams>) -> Response {
    admit(
        &state,
        AuditEvent::QuoteServer {
            timestamp: now_ms(),
            server: p.server,
            transaction_num: p.transaction_num,
            username: p.username,
            stock_symbol: p.stock_symbol,
            price: p.price,
            quote_server_time: p.quote_server_time,
            cryptokey: p.cryptokey,
        },
    )
    .await
}

async fn account_transaction(
    State(state): State<AuditState>,
    Query(p): Query<EventParams>,
) -> Response {
    admit(
        &state,
        AuditEvent::AccountTransaction {
            timestamp: now_ms(),
            server: p.server,
            transaction_num: p.transaction_num,
            action: p.action,
            username: p.username,
            funds: p.funds,
        },
    )
    .await
}

async fn system_event(State(state): State<AuditState>, Query(p): Query<EventParams>) -> Response {
    admit(
        &state,
        AuditEvent::SystemEvent {
            timestamp: now_ms(),
            server: p.server,
            transaction_num: p.transaction_num,
            command: p.command,
            username: p.username,
            stock_symbol: p.stock_symbol,
            filename: p.filename,
            funds: p.funds,
        },
    )
    .await
}

async fn error_event(State(state): State<AuditState>, Query(p): Query<EventParams>) -> Response {
    admit(
        &state,
        AuditEvent::ErrorEvent {
            timestamp: now_ms(),
            server: p.server,
            transaction_num: p.transaction_num,
            command: p.command,
            username: p.username,
            stock_symbol: p.stock_symbol,
            filename: p.filename,
            funds: p.funds,
            error_message: p.error_message,
        },
    )
    .await
}

#[derive(Debug, Default, Deserialize)]
pub struct DumpParams {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub username: String,
}

/// Snapshot the full log to the named file under the read lock.
///
/// The filename is taken as-is, with no path restriction — a known gap in
/// the reference contract, kept pending an explicit allow-list decision.
async fn dump_log(State(state): State<AuditState>, Query(p): Query<DumpParams>) -> Response {
    info!(filename = %p.filename, username = %p.username, "dumping log");
    let document = {
        let log = state.log.read().await;
        log.render_xml()
    };
    match tokio::fs::write(&p.filename, document).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            warn!(filename = %p.filename, %err, "dump write failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Stream back the bytes of a previously written dump file. Same
/// unvalidated-filename gap as `/dumpLog`.
async fn dump_log_retrieve(
    State(_state): State<AuditState>,
    Form(p): Form<DumpParams>,
) -> Response {
    match tokio::fs::read(&p.filename).await {
        Ok(bytes) => bytes.into_response(),
        Err(err) => {
            warn!(filename = %p.filename, %err, "dump retrieve failed");
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
    }
}

/// Build the audit-plane router.
#[must_use]
pub fn router(state: AuditState) -> Router {
    Router::new()
        .route("/userCommand", post(user_command))
        .route("/quoteServer", post(quote_server))
        .route("/accountTransaction", post(account_transaction))
        .route("/systemEvent", post(system_event))
        .route("/errorEvent", post(error_event))
        .route("/dumpLog", post(dump_log))
        .route("/dumpLogRetrieve", post(dump_log_retrieve))
        .with_state(state)
}
