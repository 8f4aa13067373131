use super::{DnsTransport, ExchangeTimeouts, TransportResponse};
use crate::dns::forwarding::ResponseParser;
use async_trait::async_trait;
use bulkdns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one connected socket per exchange.
///
/// Connecting the socket makes the kernel drop datagrams from any other
/// source; datagrams whose ID differs from the query are skipped until the
/// read deadline passes.
pub struct UdpTransport {
    server_addr: SocketAddr,
    timeouts: ExchangeTimeouts,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, timeouts: ExchangeTimeouts) -> Self {
        Self {
            server_addr,
            timeouts,
        }
    }

    async fn connect(&self) -> Result<UdpSocket, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let dial = async {
            let socket = UdpSocket::bind(bind_addr).await?;
            socket.connect(self.server_addr).await?;
            Ok::<_, std::io::Error>(socket)
        };

        timeout(self.timeouts.dial, dial)
            .await
            .map_err(|_| self.timed_out(self.timeouts.dial))?
            .map_err(|e| self.network_error("connect", e))
    }

    fn timed_out(&self, after: Duration) -> DomainError {
        DomainError::NetworkTimeout {
            server: self.server_addr,
            timeout_ms: after.as_millis() as u64,
        }
    }

    fn network_error(&self, phase: &str, e: std::io::Error) -> DomainError {
        DomainError::NetworkError {
            server: self.server_addr,
            reason: format!("{} failed: {}", phase, e),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        query_id: u16,
    ) -> Result<TransportResponse, DomainError> {
        let socket = self.connect().await?;

        let bytes_sent = timeout(self.timeouts.write, socket.send(message_bytes))
            .await
            .map_err(|_| self.timed_out(self.timeouts.write))?
            .map_err(|e| self.network_error("send", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            id = query_id,
            "UDP query sent"
        );

        let deadline = Instant::now() + self.timeouts.read;
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let bytes_received = timeout_at(deadline, socket.recv(&mut recv_buf))
                .await
                .map_err(|_| self.timed_out(self.timeouts.read))?
                .map_err(|e| self.network_error("receive", e))?;

            match ResponseParser::peek_id(&recv_buf[..bytes_received]) {
                Some(id) if id == query_id => {
                    recv_buf.truncate(bytes_received);
                    debug!(
                        server = %self.server_addr,
                        bytes_received = bytes_received,
                        "UDP response received"
                    );
                    return Ok(TransportResponse {
                        bytes: recv_buf,
                        protocol_used: "UDP",
                    });
                }
                other => {
                    debug!(
                        server = %self.server_addr,
                        expected = query_id,
                        received = ?other,
                        "Discarding UDP datagram with mismatched ID"
                    );
                }
            }
        }
    }
}
