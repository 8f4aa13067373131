use super::{DomainError, InputLine};
use std::net::SocketAddr;
use std::sync::Arc;

/// Terminal outcome for one input line. Built once by the resolver and
/// handed to the collector; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub original_line: Arc<str>,
    pub domain: Arc<str>,
    pub server: Option<SocketAddr>,
    pub addresses: Vec<String>,
    pub error: Option<DomainError>,
    pub attempts: u32,
}

impl ResolutionResult {
    pub fn success(
        line: &InputLine,
        server: SocketAddr,
        addresses: Vec<String>,
        attempts: u32,
    ) -> Self {
        Self {
            original_line: Arc::clone(&line.raw),
            domain: Arc::clone(&line.domain),
            server: Some(server),
            addresses,
            error: None,
            attempts,
        }
    }

    pub fn failure(
        line: &InputLine,
        server: Option<SocketAddr>,
        error: DomainError,
        attempts: u32,
    ) -> Self {
        Self {
            original_line: Arc::clone(&line.raw),
            domain: Arc::clone(&line.domain),
            server,
            addresses: Vec::new(),
            error: Some(error),
            attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn label(&self, preserve_input: bool) -> &str {
        if preserve_input {
            &self.original_line
        } else {
            &self.domain
        }
    }

    /// `<label> <addresses...>`; the separator is written even when no
    /// address was found.
    pub fn format_line(&self, preserve_input: bool) -> String {
        format!("{} {}", self.label(preserve_input), self.addresses.join(" "))
    }
}
