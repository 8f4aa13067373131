use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid server address: {0}")]
    InvalidServerAddress(String),

    #[error("Timed out after {timeout_ms}ms waiting for {server}")]
    NetworkTimeout { server: SocketAddr, timeout_ms: u64 },

    #[error("Network error talking to {server}: {reason}")]
    NetworkError { server: SocketAddr, reason: String },

    #[error("Malformed DNS response: {0}")]
    MalformedResponse(String),

    #[error("No answers found for {0}")]
    NoAnswerFound(String),

    #[error("Expected parsed domain value to be '{expected}', but instead found '{found}'")]
    DomainMismatch { expected: String, found: String },

    #[error("Max attempts exhausted after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<DomainError>,
    },

    #[error("No working DNS servers found")]
    NoServersAvailable,

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Errors that justify another attempt against a (possibly different) server.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkTimeout { .. }
                | Self::NetworkError { .. }
                | Self::MalformedResponse(_)
                | Self::NoAnswerFound(_)
                | Self::DomainMismatch { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::NetworkTimeout { .. } => true,
            Self::RetriesExhausted { last, .. } => last.is_timeout(),
            _ => false,
        }
    }
}
