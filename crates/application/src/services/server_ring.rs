use crate::ports::DnsExchange;
use bulkdns_domain::{DnsQuery, DomainError};
use futures::future::join_all;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

struct RingState {
    servers: Vec<SocketAddr>,
    cursor: Option<usize>,
}

/// Round-robin ring of DNS servers shared by every worker.
///
/// Reading and advancing the cursor happen under one lock, so concurrent
/// callers each get a distinct position in the rotation. The ring is never
/// empty: construction rejects an empty list and a health check that would
/// prune every server leaves the ring untouched and reports an error.
pub struct ServerRing {
    state: Mutex<RingState>,
}

impl ServerRing {
    pub fn new(servers: Vec<SocketAddr>) -> Result<Self, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::NoServersAvailable);
        }
        Ok(Self {
            state: Mutex::new(RingState {
                servers,
                cursor: None,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, RingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advances the cursor and returns the server under it. The first call
    /// returns the first server; after the last one it wraps to index 0.
    pub fn next(&self) -> SocketAddr {
        let mut state = self.lock();
        let next = match state.cursor {
            Some(i) if i + 1 < state.servers.len() => i + 1,
            _ => 0,
        };
        state.cursor = Some(next);
        state.servers[next]
    }

    pub fn len(&self) -> usize {
        self.lock().servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().servers.is_empty()
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.lock().servers.clone()
    }

    /// Probes every server concurrently with `probe` and keeps the ones that
    /// answered. Returns how many survived.
    ///
    /// A reply counts as healthy unless its response code marks the server
    /// itself as broken (SERVFAIL, REFUSED, NOTIMP); NXDOMAIN is an answer.
    pub async fn health_check(
        &self,
        exchange: &dyn DnsExchange,
        probe: &DnsQuery,
        probe_timeout: Duration,
    ) -> Result<usize, DomainError> {
        let candidates = self.servers();
        info!(
            servers = candidates.len(),
            domain = %probe.domain,
            "Health checking DNS servers"
        );

        let probes = candidates.iter().map(|&server| async move {
            let outcome = match timeout(probe_timeout, exchange.exchange(probe, server)).await {
                Ok(Ok(reply)) if reply.response.rcode.is_server_error() => {
                    Err(DomainError::MalformedResponse(format!(
                        "response code {}",
                        reply.response.rcode
                    )))
                }
                Ok(Ok(reply)) => Ok(reply.rtt),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(DomainError::NetworkTimeout {
                    server,
                    timeout_ms: probe_timeout.as_millis() as u64,
                }),
            };
            (server, outcome)
        });

        let mut working = Vec::with_capacity(candidates.len());
        for (server, outcome) in join_all(probes).await {
            match outcome {
                Ok(rtt) => {
                    debug!(server = %server, rtt_ms = rtt.as_millis() as u64, "Good server");
                    working.push(server);
                }
                Err(e) => warn!(server = %server, error = %e, "Dropping unresponsive server"),
            }
        }

        if working.is_empty() {
            return Err(DomainError::NoServersAvailable);
        }

        let survivors = working.len();
        let mut state = self.lock();
        state.servers = working;
        state.cursor = None;
        info!(
            healthy = survivors,
            pruned = candidates.len() - survivors,
            "Health check complete"
        );
        Ok(survivors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> SocketAddr {
        SocketAddr::from(([10, 0, 0, last], 53))
    }

    #[test]
    fn test_empty_ring_rejected() {
        assert!(matches!(
            ServerRing::new(vec![]),
            Err(DomainError::NoServersAvailable)
        ));
    }

    #[test]
    fn test_next_starts_at_first_and_wraps() {
        let ring = ServerRing::new(vec![addr(1), addr(2), addr(3)]).unwrap();

        let seen: Vec<_> = (0..7).map(|_| ring.next()).collect();
        assert_eq!(
            seen,
            vec![addr(1), addr(2), addr(3), addr(1), addr(2), addr(3), addr(1)]
        );
    }

    #[test]
    fn test_single_server_ring_always_returns_it() {
        let ring = ServerRing::new(vec![addr(9)]).unwrap();
        for _ in 0..5 {
            assert_eq!(ring.next(), addr(9));
        }
    }
}
