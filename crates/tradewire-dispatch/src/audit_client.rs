//! Client side of the audit plane.
//!
//! Events travel as query parameters to the admission endpoint matching
//! their variant; the audit plane stamps the admission timestamp itself.
//! A failed post is logged and swallowed — audit delivery must never fail
//! a user command. Dump trigger and retrieval do propagate failures, since
//! DUMPLOG's response body is the dump itself.

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use tradewire_types::{AuditEvent, Result, TwError};

/// Where the dispatcher's audit records go. Implemented by
/// [`HttpAuditSink`] for production and by recording fakes in tests.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Admit one event. Best-effort: delivery failures are logged, not
    /// returned.
    async fn record(&self, event: AuditEvent);

    /// Trigger a synchronous snapshot of the event log to `filename`.
    async fn dump_log(&self, filename: &str, username: &str) -> Result<()>;

    /// Fetch the bytes of a previously written dump file.
    async fn retrieve_dump(&self, filename: &str) -> Result<Vec<u8>>;
}

/// HTTP sink posting to the audit plane's admission endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuditSink {
    base_url: String,
    client: Client,
}

impl HttpAuditSink {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn unavailable(err: &reqwest::Error) -> TwError {
        TwError::AuditUnavailable {
            reason: err.to_string(),
        }
    }
}

/// Flatten an event into its endpoint's query parameters, omitting empty
/// fields (the audit plane defaults absent parameters to empty anyway).
fn query_params(event: &AuditEvent) -> Vec<(&'static str, &str)> {
    let pairs: Vec<(&'static str, &str)> = match event {
        AuditEvent::UserCommand {
            server,
            transaction_num,
            command,
            username,
            stock_symbol,
            filename,
            funds,
            ..
        }
        | AuditEvent::SystemEvent {
            server,
            transaction_num,
            command,
            username,
            stock_symbol,
            filename,
            funds,
            ..
        } => vec![
            ("server", server),
            ("transactionNum", transaction_num),
            ("command", command),
            ("username", username),
            ("stockSymbol", stock_symbol),
            ("filename", filename),
            ("funds", funds),
        ],
        AuditEvent::QuoteServer {
            server,
            transaction_num,
            username,
            stock_symbol,
            price,
            quote_server_time,
            cryptokey,
            ..
        } => vec![
            ("server", server),
            ("transactionNum", transaction_num),
            ("username", username),
            ("stockSymbol", stock_symbol),
            ("price", price),
            ("quoteServerTime", quote_server_time),
            ("cryptokey", cryptokey),
        ],
        AuditEvent::AccountTransaction {
            server,
            transaction_num,
            action,
            username,
            funds,
            ..
        } => vec![
            ("server", server),
            ("transactionNum", transaction_num),
            ("action", action),
            ("username", username),
            ("funds", funds),
        ],
        AuditEvent::ErrorEvent {
            server,
            transaction_num,
            command,
            username,
            stock_symbol,
            filename,
            funds,
            error_message,
            ..
        } => vec![
            ("server", server),
            ("transactionNum", transaction_num),
            ("command", command),
            ("username", username),
            ("stockSymbol", stock_symbol),
            ("filename", filename),
            ("funds", funds),
            ("errorMessage", error_message),
        ],
    };
    pairs
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn record(&self, event: AuditEvent) {
        let url = format!("{}/{}", self.base_url, event.element_name());
        let params = query_params(&event);
        if let Err(err) = self.client.post(&url).query(&params).send().await {
            warn!(endpoint = event.element_name(), %err, "audit record dropped");
        }
    }

    async fn dump_log(&self, filename: &str, username: &str) -> Result<()> {
        let url = format!("{}/dumpLog", self.base_url);
        self.client
            .post(&url)
            .query(&[("filename", filename), ("username", username)])
            .send()
            .await
            .map_err(|err| Self::unavailable(&err))?
            .error_for_status()
            .map_err(|err| Self::unavailable(&err))?;
        Ok(())
    }

    async fn retrieve_dump(&self, filename: &str) -> Result<Vec<u8>> {
        let url = format!("{}/dumpLogRetrieve", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[("filename", filename)])
            .send()
            .await
            .map_err(|err| Self::unavailable(&err))?
            .error_for_status()
            .map_err(|err| Self::unavailable(&err))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| Self::unavailable(&err))?;
        Ok(bytes.to_vec())
    }
}
