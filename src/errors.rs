//! Typed failure taxonomy for the triage tiers.
//!
//! Adapter errors never escape the dispatcher: every variant means "advance to
//! the next tier". Database errors are terminal for a request and surface as
//! an ERROR-labeled verdict, not as a propagated error.

/// Failure of a remote adapter call.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network, TLS, timeout, or non-2xx status failures.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response decoded but did not carry the expected shape/fields.
    #[error("parse error: {0}")]
    Parse(String),

    /// Credential missing or rejected before a call could be made.
    #[error("auth error: {0}")]
    Auth(String),
}

impl AdapterError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            // Timeouts, connect failures, and status errors all advance the
            // dispatcher the same way.
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Failure to read or decode the scam-signature database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed database: {0}")]
    Malformed(#[from] serde_json::Error),
}
