use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{DnsTransport, ExchangeTimeouts, UdpTransport};
use async_trait::async_trait;
use bulkdns_application::ports::{DnsExchange, ExchangeReply};
use bulkdns_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::debug;

/// [`DnsExchange`] over plain UDP: encodes with hickory, sends on a fresh
/// socket and decodes the matching reply.
pub struct HickoryExchange {
    timeouts: ExchangeTimeouts,
}

impl HickoryExchange {
    pub fn new(timeouts: ExchangeTimeouts) -> Self {
        Self { timeouts }
    }
}

#[async_trait]
impl DnsExchange for HickoryExchange {
    async fn exchange(
        &self,
        query: &DnsQuery,
        server: SocketAddr,
    ) -> Result<ExchangeReply, DomainError> {
        let (id, message_bytes) = MessageBuilder::build_query_with_id(query)?;
        let transport = UdpTransport::new(server, self.timeouts);

        let started = Instant::now();
        let raw = transport.send(&message_bytes, id).await?;
        let rtt = started.elapsed();

        let response = ResponseParser::parse(&raw.bytes)?;

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            server = %server,
            protocol = raw.protocol_used,
            rtt_ms = rtt.as_millis() as u64,
            "Exchange finished"
        );

        Ok(ExchangeReply { response, rtt })
    }
}
