//! Line protocol codec for the backend transaction engine.
//!
//! Request: `"<transactionNumber>;<COMMAND>,<arg1>,<arg2>,...\n"`.
//! Response: one `\n`-terminated line. The literal `"-1"` is the sole
//! failure signal the backend emits; [`decode_reply`] converts it into a
//! typed error so the sentinel never reaches callers as a value.

use tradewire_types::{constants, CommandKind, Result, TwError};

/// Encode a command payload: `"BUY,alice,ABC,100"`.
///
/// Empty trailing args are not trimmed — the arg list is chosen by the
/// dispatcher per command and is always fully populated.
#[must_use]
pub fn encode_payload(command: CommandKind, args: &[&str]) -> String {
    let mut payload = command.as_str().to_string();
    for arg in args {
        payload.push(',');
        payload.push_str(arg);
    }
    payload
}

/// Frame a payload for transmission: `"<txn>;<payload>\n"`.
#[must_use]
pub fn encode_frame(txn: u64, payload: &str) -> String {
    format!("{txn};{payload}\n")
}

/// Strip the line terminator from a backend reply and map the failure
/// sentinel to [`TwError::BackendError`].
///
/// # Errors
/// Returns `BackendError` if the reply is the `"-1"` sentinel.
pub fn decode_reply(line: &str) -> Result<String> {
    let reply = line.trim_end_matches(['\n', '\r']);
    if reply == constants::BACKEND_FAILURE_SENTINEL {
        return Err(TwError::BackendError {
            reason: constants::BAD_BACKEND_RESPONSE.to_string(),
        });
    }
    Ok(reply.to_string())
}
