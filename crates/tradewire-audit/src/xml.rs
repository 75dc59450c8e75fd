//! XML dump schema for the event log.
//!
//! This schema is an external contract consumed by downstream audit
//! tooling: `<log>` root, one element per event named after its variant,
//! child elements in fixed order, empty fields omitted. Field values are
//! escaped for `&`, `<`, and `>`.

use tradewire_types::AuditEvent;

/// Escape the three characters that would break element content.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn field(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    out.push_str("    <");
    out.push_str(name);
    out.push('>');
    out.push_str(&escape(value));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

/// Append one event element to `out`.
pub fn write_event(out: &mut String, event: &AuditEvent) {
    let name = event.element_name();
    out.push_str("  <");
    out.push_str(name);
    out.push_str(">\n");

    field(out, "timestamp", &event.timestamp().to_string());
    match event {
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
        } => {
            field(out, "server", server);
            field(out, "transactionNum", transaction_num);
            field(out, "command", command);
            field(out, "username", username);
            field(out, "stockSymbol", stock_symbol);
            field(out, "filename", filename);
            field(out, "funds", funds);
        }
        AuditEvent::QuoteServer {
            server,
            transaction_num,
            username,
            stock_symbol,
            price,
            quote_server_time,
            cryptokey,
            ..
        } => {
            field(out, "server", server);
            field(out, "transactionNum", transaction_num);
            field(out, "price", price);
            field(out, "stockSymbol", stock_symbol);
            field(out, "username", username);
            field(out, "quoteServerTime", quote_server_time);
            field(out, "cryptokey", cryptokey);
        }
        AuditEvent::AccountTransaction {
            server,
            transaction_num,
            action,
            username,
            funds,
            ..
        } => {
            field(out, "server", server);
            field(out, "transactionNum", transaction_num);
            field(out, "action", action);
            field(out, "username", username);
            field(out, "funds", funds);
        }
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
        } => {
            field(out, "server", server);
            field(out, "transactionNum", transaction_num);
            field(out, "command", command);
            field(out, "username", username);
            field(out, "stockSymbol", stock_symbol);
            field(out, "filename", filename);
            field(out, "funds", funds);
            field(out, "errorMessage", error_message);
        }
    }

    out.push_str("  </");
    out.push_str(name);
    out.push_str(">\n");
}

/// Render the full log document in position order.
#[must_use]
pub fn render_log(events: &[AuditEvent]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<log>\n");
    for event in events {
        write_event(&mut out, event);
    }
    out.push_str("</log>\n");
    out
}
