//! Probe errors - failure categories and operator-facing text

use reqwest::StatusCode;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Coarse failure category callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Endpoint unreachable or connection refused
    Connectivity,
    /// Request exceeded its bound
    Timeout,
    /// Non-success HTTP status
    Protocol,
    /// Body not valid JSON or missing expected fields
    Decode,
    /// Rejected locally before any network call
    InvalidInput,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::Connectivity => "connectivity",
            FailureKind::Timeout => "timeout",
            FailureKind::Protocol => "protocol",
            FailureKind::Decode => "decode",
            FailureKind::InvalidInput => "invalid input",
        }
    }

    /// What an operator should do about this kind of failure
    pub fn operator_hint(self) -> &'static str {
        match self {
            FailureKind::Connectivity => {
                "Start LM Studio and its local server, then check the base URL and port."
            }
            FailureKind::Timeout => {
                "The server accepted the connection but did not answer in time. Make sure a model is loaded and not still warming up."
            }
            FailureKind::Protocol => {
                "The server reported an error for this request. Check the LM Studio server log."
            }
            FailureKind::Decode => {
                "The server response is not OpenAI-compatible. Make sure the URL points at LM Studio."
            }
            FailureKind::InvalidInput => "Fix the request parameters and try again.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single captured probe failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("connection refused")]
    ConnectionRefused,
    #[error("connection failed: {reason}")]
    Connect { reason: String },
    #[error("timeout after {}ms", .after.as_millis())]
    Timeout { after: Duration },
    #[error("bad status code: {status}")]
    BadStatus { status: u16 },
    #[error("malformed body: {reason}")]
    MalformedBody { reason: String },
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl ProbeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProbeError::ConnectionRefused | ProbeError::Connect { .. } => {
                FailureKind::Connectivity
            }
            ProbeError::Timeout { .. } => FailureKind::Timeout,
            ProbeError::BadStatus { .. } => FailureKind::Protocol,
            ProbeError::MalformedBody { .. } => FailureKind::Decode,
            ProbeError::InvalidRequest { .. } => FailureKind::InvalidInput,
        }
    }

    pub fn bad_status(status: StatusCode) -> Self {
        Self::BadStatus {
            status: status.as_u16(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBody {
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Map a transport error onto a failure category.
    ///
    /// `after` is the bound that was configured for the request, reported
    /// back when the transport gave up on it.
    pub fn from_transport(err: &reqwest::Error, after: Duration) -> Self {
        if err.is_timeout() {
            return Self::Timeout { after };
        }
        if let Some(status) = err.status() {
            return Self::bad_status(status);
        }
        if err.is_decode() {
            return Self::malformed(err.to_string());
        }
        if is_connection_refused(err) {
            return Self::ConnectionRefused;
        }
        Self::Connect {
            reason: root_cause(err),
        }
    }

    /// User-friendly message with the category and what to do next
    pub fn user_message(&self) -> String {
        format!("{self} ({}). {}", self.kind(), self.kind().operator_hint())
    }
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn root_cause(err: &reqwest::Error) -> String {
    let mut last: &(dyn StdError + 'static) = err;
    while let Some(next) = last.source() {
        last = next;
    }
    last.to_string()
}
