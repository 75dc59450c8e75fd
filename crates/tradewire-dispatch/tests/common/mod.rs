//! Shared fakes for dispatch-plane integration tests: a scripted backend
//! standing in for the transaction engine and a recording audit sink.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use tradewire_dispatch::{AuditSink, Backend};
use tradewire_types::{AuditEvent, Result, TwError};

/// Backend fake. Replies are served front-to-back from the script; once
/// the script is exhausted every call succeeds with `"1"`.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String>>>,
    sent: Mutex<Vec<(u64, String)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted failure for the next call.
    pub fn fail_next(&self) {
        self.script.lock().unwrap().push_back(Err(TwError::BackendError {
            reason: "Bad response from transactionserv".to_string(),
        }));
    }

    /// Queue a scripted reply for the next call.
    pub fn reply_next(&self, reply: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(reply.to_string()));
    }

    /// Payloads sent so far, in call order.
    pub fn sent(&self) -> Vec<(u64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_payloads(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, p)| p).collect()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn send(&self, txn: u64, payload: &str) -> Result<String> {
        self.sent.lock().unwrap().push((txn, payload.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("1".to_string()))
    }
}

/// Audit sink that records everything in admission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AuditEvent>>,
    dumps: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn dumps(&self) -> Vec<(String, String)> {
        self.dumps.lock().unwrap().clone()
    }

    /// Commands of recorded `UserCommand` events, in admission order.
    pub fn user_commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                AuditEvent::UserCommand { command, .. } => Some(command),
                _ => None,
            })
            .collect()
    }

    /// Error messages of recorded `ErrorEvent`s, in admission order.
    pub fn error_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                AuditEvent::ErrorEvent { error_message, .. } => Some(error_message),
                _ => None,
            })
            .collect()
    }

    /// Transaction numbers across all recorded events.
    pub fn transaction_nums(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| match event {
                AuditEvent::UserCommand {
                    transaction_num, ..
                }
                | AuditEvent::ErrorEvent {
                    transaction_num, ..
                }
                | AuditEvent::SystemEvent {
                    transaction_num, ..
                }
                | AuditEvent::QuoteServer {
                    transaction_num, ..
                }
                | AuditEvent::AccountTransaction {
                    transaction_num, ..
                } => transaction_num,
            })
            .collect()
    }
}

#[async_trait]
impl AuditSink for RecordingSink {
    async fn record(&self, event: AuditEvent) {
        self.events.lock().unwrap().push(event);
    }

    async fn dump_log(&self, filename: &str, username: &str) -> Result<()> {
        self.dumps
            .lock()
            .unwrap()
            .push((filename.to_string(), username.to_string()));
        Ok(())
    }

    async fn retrieve_dump(&self, _filename: &str) -> Result<Vec<u8>> {
        Ok(b"<?xml version=\"1.0\"?>\n<log>\n</log>\n".to_vec())
    }
}
