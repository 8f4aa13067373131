use async_trait::async_trait;
use bulkdns_domain::{DnsQuery, DnsResponse, DomainError};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExchangeReply {
    pub response: DnsResponse,
    pub rtt: Duration,
}

/// Sends one query to one server and waits for its reply.
///
/// Implementations apply their own transport timeouts. Callers that need a
/// hard bound on the whole exchange race it against a timer themselves.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn exchange(
        &self,
        query: &DnsQuery,
        server: SocketAddr,
    ) -> Result<ExchangeReply, DomainError>;
}
