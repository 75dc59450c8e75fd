//! Admission boundary and the single log writer.
//!
//! Producers hand events to [`AuditIngest::admit`], which enqueues into a
//! bounded channel. A full queue blocks the producer until space frees up
//! — backpressure, never a drop. Admission acknowledges on enqueue; the
//! durable append happens later on the one consumer task, which is what
//! makes log position order equal queue arrival order.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, trace};

use tradewire_types::{AuditEvent, Result, TwError};

use crate::event_log::SharedEventLog;

/// Producer-side handle into the audit queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AuditIngest {
    tx: mpsc::Sender<AuditEvent>,
}

impl AuditIngest {
    /// Admit one event. Blocks while the queue is full.
    ///
    /// # Errors
    /// Returns [`TwError::QueueClosed`] if the writer task has stopped.
    pub async fn admit(&self, event: AuditEvent) -> Result<()> {
        self.tx.send(event).await.map_err(|_| TwError::QueueClosed)
    }
}

/// Wire up the queue and spawn the single writer task.
///
/// The writer drains strictly in arrival order and appends each event to
/// the next free log slot. On overflow it logs at error level and stops:
/// fail-fast, with subsequent admissions failing `QueueClosed` once the
/// channel buffer drains.
pub fn audit_pipeline(
    log: SharedEventLog,
    queue_capacity: usize,
) -> (AuditIngest, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let handle = tokio::spawn(run_writer(rx, log));
    (AuditIngest { tx }, handle)
}

async fn run_writer(mut rx: mpsc::Receiver<AuditEvent>, log: SharedEventLog) {
    info!("audit writer started");
    while let Some(event) = rx.recv().await {
        let mut guard = log.write().await;
        match guard.append(event) {
            Ok(position) => trace!(position, "event appended"),
            Err(err) => {
                error!(%err, "event log full, audit writer stopping");
                return;
            }
        }
    }
    info!("audit queue closed, writer exiting");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::event_log;
    use tradewire_types::now_ms;

    fn event(txn: u64) -> AuditEvent {
        AuditEvent::UserCommand {
            timestamp: now_ms(),
            server: "test".into(),
            transaction_num: txn.to_string(),
            command: "ADD".into(),
            username: "alice".into(),
            stock_symbol: String::new(),
            filename: String::new(),
            funds: String::new(),
        }
    }

    fn txn_of(event: &AuditEvent) -> String {
        match event {
            AuditEvent::UserCommand {
                transaction_num, ..
            } => transaction_num.clone(),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn admitted_events_reach_the_log_in_order() {
        let log = event_log::shared(16);
        let (ingest, handle) = audit_pipeline(Arc::clone(&log), 8);

        for txn in 1..=5 {
            ingest.admit(event(txn)).await.unwrap();
        }
        drop(ingest);
        handle.await.unwrap();

        let log = log.read().await;
        assert_eq!(log.len(), 5);
        for (position, entry) in log.entries().iter().enumerate() {
            assert_eq!(txn_of(entry), (position + 1).to_string());
        }
    }

    #[tokio::test]
    async fn writer_stops_on_overflow() {
        let log = event_log::shared(2);
        let (ingest, handle) = audit_pipeline(Arc::clone(&log), 8);

        for txn in 1..=3 {
            ingest.admit(event(txn)).await.unwrap();
        }
        drop(ingest);
        handle.await.unwrap();

        // Two appended, the third hit the capacity wall.
        assert_eq!(log.read().await.len(), 2);
    }

    #[tokio::test]
    async fn admit_after_writer_death_fails() {
        let log = event_log::shared(0);
        let (ingest, handle) = audit_pipeline(log, 1);

        // Capacity zero: the first delivered event kills the writer.
        ingest.admit(event(1)).await.unwrap();
        handle.await.unwrap();

        let err = ingest.admit(event(2)).await.unwrap_err();
        assert!(matches!(err, TwError::QueueClosed));
    }
}
