pub mod udp;

use async_trait::async_trait;
use bulkdns_domain::config::EngineConfig;
use bulkdns_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Per-phase deadlines of one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeTimeouts {
    pub dial: Duration,
    pub write: Duration,
    pub read: Duration,
}

impl From<&EngineConfig> for ExchangeTimeouts {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            dial: Duration::from_millis(engine.dial_timeout_ms),
            write: Duration::from_millis(engine.write_timeout_ms),
            read: Duration::from_millis(engine.read_timeout_ms),
        }
    }
}

impl Default for ExchangeTimeouts {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends `message_bytes` and waits for the response carrying `query_id`.
    async fn send(
        &self,
        message_bytes: &[u8],
        query_id: u16,
    ) -> Result<TransportResponse, DomainError>;
}
