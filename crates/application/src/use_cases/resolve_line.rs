use crate::ports::DnsExchange;
use crate::services::ServerRing;
use bulkdns_domain::{
    AnswerParser, DnsQuery, DomainError, InputLine, ResolutionResult, RetryPolicy, RotationPolicy,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::debug;

/// Resolves a single input line, retrying across the ring until it gets a
/// usable answer or runs out of attempts.
///
/// The attempt loop is bounded by the policy's cap and always yields exactly
/// one [`ResolutionResult`].
pub struct ResolveLineUseCase {
    exchange: Arc<dyn DnsExchange>,
    ring: Arc<ServerRing>,
    policy: RetryPolicy,
}

impl ResolveLineUseCase {
    pub fn new(exchange: Arc<dyn DnsExchange>, ring: Arc<ServerRing>, policy: RetryPolicy) -> Self {
        Self {
            exchange,
            ring,
            policy,
        }
    }

    pub fn ring(&self) -> &Arc<ServerRing> {
        &self.ring
    }

    pub async fn execute(&self, line: &InputLine) -> ResolutionResult {
        let start = self.ring.next();
        self.execute_from(line, start).await
    }

    pub async fn execute_from(&self, line: &InputLine, start: SocketAddr) -> ResolutionResult {
        let query = DnsQuery::for_target(&line.domain);
        let max_attempts = self.policy.attempt_cap.max_attempts(self.ring.len());

        let mut server = start;
        let mut attempt: u32 = 1;
        loop {
            match self.attempt(&query, server).await {
                Ok(addresses) => {
                    debug!(
                        domain = %line.domain,
                        server = %server,
                        attempt,
                        addresses = addresses.len(),
                        "Resolved"
                    );
                    return ResolutionResult::success(line, server, addresses, attempt);
                }
                Err(e) if !e.is_retryable() => {
                    return ResolutionResult::failure(line, Some(server), e, attempt);
                }
                Err(e) if attempt >= max_attempts => {
                    let error = DomainError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    };
                    return ResolutionResult::failure(line, Some(server), error, attempt);
                }
                Err(e) => {
                    let next = match self.policy.rotation {
                        RotationPolicy::Rotate => self.ring.next(),
                        RotationPolicy::SameServer => server,
                    };
                    debug!(
                        domain = %line.domain,
                        server = %server,
                        next = %next,
                        attempt,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    server = next;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, query: &DnsQuery, server: SocketAddr) -> Result<Vec<String>, DomainError> {
        let reply = match timeout(self.policy.lookup_timeout, self.exchange.exchange(query, server)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(DomainError::NetworkTimeout {
                    server,
                    timeout_ms: self.policy.lookup_timeout.as_millis() as u64,
                })
            }
        };

        debug!(
            domain = %query.domain,
            server = %server,
            rtt_ms = reply.rtt.as_millis() as u64,
            rcode = %reply.response.rcode,
            answers = reply.response.answers.len(),
            "Exchange complete"
        );

        if !reply.response.rcode.is_success() {
            return Err(DomainError::MalformedResponse(format!(
                "response code {} from {}",
                reply.response.rcode, server
            )));
        }

        if reply.response.truncated {
            return Err(DomainError::MalformedResponse(format!(
                "truncated response from {}",
                server
            )));
        }

        let parsed = AnswerParser::parse(&query.domain, &reply.response.answers, query.record_type)?;
        Ok(parsed.addresses)
    }
}
