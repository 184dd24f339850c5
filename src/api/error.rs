use std::fmt;

use thiserror::Error;

/// Errors raised by the HTTP client wrappers.
///
/// Every failure is normalized into one of these before it reaches a
/// container. None of them is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token is stored. Raised before any request is sent.
    #[error("Authentication token is missing. Please log in.")]
    MissingCredential,
    /// The backend answered with a non-2xx status and a JSON error body.
    #[error("{}", server_message(.status, .payload))]
    Server {
        status: u16,
        payload: serde_json::Value,
    },
    /// Non-2xx status without a JSON body.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// Local file I/O (CSV export, session file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl ApiError {
    /// The value a container stores in its `error` field: the server's error
    /// payload when there is one, otherwise the message string.
    pub fn payload(&self) -> ErrorPayload {
        match self {
            ApiError::Server { payload, .. } => ErrorPayload::Server(payload.clone()),
            other => ErrorPayload::Message(other.to_string()),
        }
    }
}

/// Error value mirrored into a container.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    Server(serde_json::Value),
    Message(String),
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Server(value) => match describe_payload(value) {
                Some(msg) => f.write_str(&msg),
                None => write!(f, "{value}"),
            },
            ErrorPayload::Message(msg) => f.write_str(msg),
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(msg: &str) -> Self {
        ErrorPayload::Message(msg.to_string())
    }
}

fn server_message(status: &u16, payload: &serde_json::Value) -> String {
    describe_payload(payload).unwrap_or_else(|| format!("HTTP {status}"))
}

/// Pulls a human-readable line out of a server error body.
fn describe_payload(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => ["message", "error", "msg"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string),
        _ => None,
    }
}
