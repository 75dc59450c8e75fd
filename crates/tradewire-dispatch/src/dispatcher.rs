//! Command dispatcher: transaction numbering, audit emission, and
//! per-command side effects.
//!
//! Every inbound command allocates the next transaction number from a
//! single process-wide atomic counter (correlation only — two requests may
//! still reach the backend out of allocation order) and emits its
//! `UserCommand` audit record **before** the backend is contacted. Backend
//! failures emit an `ErrorEvent` and leave the pending queues untouched,
//! so a retried commit or cancel still acts on the same head intent.
//!
//! Commit and cancel hold the session lock across the backend round trip;
//! that is the boundary that keeps two in-flight commands for one user
//! from interleaving on the same queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use tradewire_types::{
    constants, now_ms, AuditEvent, CommandKind, DispatchConfig, OrderIntent, OrderKind, Result,
    TwError,
};

use crate::audit_client::AuditSink;
use crate::session::SessionRegistry;
use crate::transmitter::Backend;
use crate::wire;

/// Dispatch-plane core shared by all HTTP handlers.
pub struct CommandDispatcher {
    server_name: String,
    txn_counter: AtomicU64,
    sessions: SessionRegistry,
    backend: Arc<dyn Backend>,
    audit: Arc<dyn AuditSink>,
    pending_ttl: Duration,
}

impl CommandDispatcher {
    #[must_use]
    pub fn new(
        config: &DispatchConfig,
        backend: Arc<dyn Backend>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            server_name: config.server_name.clone(),
            txn_counter: AtomicU64::new(0),
            sessions: SessionRegistry::new(),
            backend,
            audit,
            pending_ttl: config.pending_ttl(),
        }
    }

    /// Allocate the next transaction number. Strictly increasing from 1
    /// for the process lifetime; values are never reused. Expose only
    /// "allocate next" — the counter is not settable.
    fn next_txn(&self) -> u64 {
        self.txn_counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn user_command_event(
        &self,
        txn: u64,
        command: CommandKind,
        username: &str,
        stock: &str,
        filename: &str,
        funds: &str,
    ) -> AuditEvent {
        AuditEvent::UserCommand {
            timestamp: now_ms(),
            server: self.server_name.clone(),
            transaction_num: txn.to_string(),
            command: command.as_str().to_string(),
            username: username.to_string(),
            stock_symbol: stock.to_string(),
            filename: filename.to_string(),
            funds: funds.to_string(),
        }
    }

    fn error_event(
        &self,
        txn: u64,
        command: CommandKind,
        username: &str,
        stock: &str,
        funds: &str,
        message: &str,
    ) -> AuditEvent {
        AuditEvent::ErrorEvent {
            timestamp: now_ms(),
            server: self.server_name.clone(),
            transaction_num: txn.to_string(),
            command: command.as_str().to_string(),
            username: username.to_string(),
            stock_symbol: stock.to_string(),
            filename: String::new(),
            funds: funds.to_string(),
            error_message: message.to_string(),
        }
    }

    /// LOGIN bypasses the backend entirely: it registers the session (if
    /// absent) and always succeeds. No credential check exists by design.
    pub async fn login(&self, username: &str) -> Result<()> {
        let txn = self.next_txn();
        self.audit
            .record(self.user_command_event(txn, CommandKind::Login, username, "", "", ""))
            .await;
        self.sessions.get_or_create(username).await;
        debug!(txn, username, "login registered");
        Ok(())
    }

    /// Forward a side-effect-free command to the backend: ADD, QUOTE,
    /// SET_*, CANCEL_SET_*, DISPLAY_SUMMARY. No session requirement and no
    /// queue mutation; the audit record is the only local effect.
    pub async fn forward(
        &self,
        command: CommandKind,
        username: &str,
        stock: &str,
        amount: &str,
    ) -> Result<String> {
        let txn = self.next_txn();
        self.audit
            .record(self.user_command_event(txn, command, username, stock, "", amount))
            .await;

        let args: Vec<&str> = match command {
            CommandKind::Add => vec![username, amount],
            CommandKind::Quote | CommandKind::CancelSetBuy | CommandKind::CancelSetSell => {
                vec![username, stock]
            }
            CommandKind::SetBuyAmount
            | CommandKind::SetBuyTrigger
            | CommandKind::SetSellAmount
            | CommandKind::SetSellTrigger => vec![username, stock, amount],
            // BUY/SELL, the queue lifecycle commands, DUMPLOG, and LOGIN
            // have dedicated entry points and never route through here.
            _ => vec![username],
        };

        match self.backend.send(txn, &wire::encode_payload(command, &args)).await {
            Ok(reply) => Ok(reply),
            Err(err) => {
                self.audit
                    .record(self.error_event(
                        txn,
                        command,
                        username,
                        stock,
                        amount,
                        constants::BAD_BACKEND_RESPONSE,
                    ))
                    .await;
                Err(err)
            }
        }
    }

    /// BUY / SELL: forward to the backend and, on success, record a
    /// pending intent at the tail of the session's queue for that side.
    pub async fn place_order(
        &self,
        kind: OrderKind,
        username: &str,
        stock: &str,
        amount: &str,
    ) -> Result<()> {
        let command = kind.place_command();
        let txn = self.next_txn();
        self.audit
            .record(self.user_command_event(txn, command, username, stock, "", amount))
            .await;

        let session = self.sessions.get(username).await?;
        let mut session = session.lock().await;

        let payload = wire::encode_payload(command, &[username, stock, amount]);
        if let Err(err) = self.backend.send(txn, &payload).await {
            self.audit
                .record(self.error_event(
                    txn,
                    command,
                    username,
                    stock,
                    amount,
                    constants::BAD_BACKEND_RESPONSE,
                ))
                .await;
            return Err(err);
        }

        session
            .pending
            .enqueue(OrderIntent::new(kind, username, stock, amount));
        debug!(txn, username, kind = %kind, stock, "intent queued");
        Ok(())
    }

    /// COMMIT_BUY / COMMIT_SELL on the head of the matching queue.
    ///
    /// An expired head triggers an implicit `CANCEL_<KIND>` to the backend;
    /// the head is removed regardless of that call's outcome and the
    /// caller's commit fails. A backend failure on the commit itself leaves
    /// the head in place.
    pub async fn commit_order(&self, kind: OrderKind, username: &str) -> Result<()> {
        let command = kind.commit_command();
        let txn = self.next_txn();
        self.audit
            .record(self.user_command_event(txn, command, username, "", "", ""))
            .await;

        let session = self.sessions.get(username).await?;
        let mut session = session.lock().await;

        let Some(head) = session.pending.head(kind) else {
            let reason = format!("No pending {}s to commit", kind.noun());
            self.audit
                .record(self.error_event(txn, command, username, "", "", &reason))
                .await;
            return Err(TwError::EmptyQueue { reason });
        };

        if head.is_expired(self.pending_ttl) {
            // Implicit cancel: the head comes off even if the backend call
            // fails, otherwise an expired intent could never be cleared.
            let payload = wire::encode_payload(kind.cancel_command(), &[username]);
            if let Err(err) = self.backend.send(txn, &payload).await {
                debug!(txn, username, %err, "implicit cancel failed");
            }
            session.pending.pop_head(kind);
            self.audit
                .record(self.error_event(txn, command, username, "", "", kind.expiry_message()))
                .await;
            return Err(TwError::ExpiredIntent { kind });
        }

        let payload = wire::encode_payload(command, &[username]);
        if let Err(err) = self.backend.send(txn, &payload).await {
            self.audit
                .record(self.error_event(
                    txn,
                    command,
                    username,
                    "",
                    "",
                    constants::BAD_BACKEND_RESPONSE,
                ))
                .await;
            return Err(err);
        }

        session.pending.pop_head(kind);
        debug!(txn, username, kind = %kind, "head committed");
        Ok(())
    }

    /// CANCEL_BUY / CANCEL_SELL on the head of the matching queue. The
    /// head comes off only when the backend acknowledges the cancel.
    pub async fn cancel_order(&self, kind: OrderKind, username: &str) -> Result<()> {
        let command = kind.cancel_command();
        let txn = self.next_txn();
        self.audit
            .record(self.user_command_event(txn, command, username, "", "", ""))
            .await;

        let session = self.sessions.get(username).await?;
        let mut session = session.lock().await;

        if !session.pending.has_pending(kind) {
            let reason = format!("No pending {}s to cancel", kind.noun());
            self.audit
                .record(self.error_event(txn, command, username, "", "", &reason))
                .await;
            return Err(TwError::EmptyQueue { reason });
        }

        let payload = wire::encode_payload(command, &[username]);
        if let Err(err) = self.backend.send(txn, &payload).await {
            self.audit
                .record(self.error_event(
                    txn,
                    command,
                    username,
                    "",
                    "",
                    constants::BAD_BACKEND_RESPONSE,
                ))
                .await;
            return Err(err);
        }

        session.pending.pop_head(kind);
        debug!(txn, username, kind = %kind, "head cancelled");
        Ok(())
    }

    /// DUMPLOG: audit the request, have the audit plane snapshot its log
    /// to `filename`, then fetch and return the dump bytes.
    pub async fn dumplog(&self, username: &str, filename: &str) -> Result<Vec<u8>> {
        let txn = self.next_txn();
        self.audit
            .record(self.user_command_event(txn, CommandKind::Dumplog, username, "", filename, ""))
            .await;

        self.audit.dump_log(filename, username).await?;
        self.audit.retrieve_dump(filename).await
    }

    /// Registry accessor for tests and diagnostics.
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}
