use async_trait::async_trait;
use bulkdns_application::ports::{DnsExchange, ExchangeReply};
use bulkdns_domain::{
    AnswerRecord, AnswerSection, DnsQuery, DnsResponse, DomainError, RecordType, ResponseCode,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// How a mock server answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answers A queries with `<n>.<n>.<n>.<n>` style addresses derived from
    /// the domain length, PTR queries with `host.example`. Names under
    /// `.invalid` get NXDOMAIN.
    Answer,
    /// Never replies; the caller's timeout has to fire.
    Hang,
    NetworkError,
    Rcode(ResponseCode),
    /// NOERROR with an empty answer section.
    Empty,
    /// Answer owned by a different name than the one queried.
    WrongName,
    /// NOERROR with one A record but the TC bit set.
    Truncated,
}

/// In-memory exchange scripted per server, recording every call and the
/// peak number of exchanges in flight.
pub struct ScriptedExchange {
    per_server: HashMap<SocketAddr, Behavior>,
    default: Behavior,
    delay: Duration,
    calls: Mutex<Vec<(SocketAddr, String)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedExchange {
    pub fn new(default: Behavior) -> Self {
        Self {
            per_server: HashMap::new(),
            default,
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_server(mut self, server: SocketAddr, behavior: Behavior) -> Self {
        self.per_server.insert(server, behavior);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(SocketAddr, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn servers_called(&self) -> Vec<SocketAddr> {
        self.calls().into_iter().map(|(s, _)| s).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn addresses_for(domain: &str) -> Vec<String> {
        let n = (domain.len() % 250) as u8 + 1;
        vec![format!("{n}.{n}.{n}.{n}")]
    }

    fn reply(rcode: ResponseCode, records: Vec<AnswerRecord>) -> ExchangeReply {
        ExchangeReply {
            response: DnsResponse::new(rcode, AnswerSection::new(records)),
            rtt: Duration::from_millis(1),
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DnsExchange for ScriptedExchange {
    async fn exchange(
        &self,
        query: &DnsQuery,
        server: SocketAddr,
    ) -> Result<ExchangeReply, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((server, query.domain.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let owner = format!("{}.", query.domain);
        let behavior = self.per_server.get(&server).unwrap_or(&self.default).clone();
        match behavior {
            Behavior::Answer if query.domain.ends_with(".invalid") => {
                Ok(Self::reply(ResponseCode::NXDomain, vec![]))
            }
            Behavior::Answer if query.record_type == RecordType::PTR => Ok(Self::reply(
                ResponseCode::NoError,
                vec![AnswerRecord::new(owner, RecordType::PTR, "host.example.")],
            )),
            Behavior::Answer => {
                let records = Self::addresses_for(&query.domain)
                    .into_iter()
                    .map(|ip| AnswerRecord::new(owner.clone(), RecordType::A, ip))
                    .collect();
                Ok(Self::reply(ResponseCode::NoError, records))
            }
            Behavior::Hang => std::future::pending().await,
            Behavior::NetworkError => Err(DomainError::NetworkError {
                server,
                reason: "connection refused".into(),
            }),
            Behavior::Rcode(rcode) => Ok(Self::reply(rcode, vec![])),
            Behavior::Empty => Ok(Self::reply(ResponseCode::NoError, vec![])),
            Behavior::Truncated => {
                let mut reply = Self::reply(
                    ResponseCode::NoError,
                    vec![AnswerRecord::new(owner, RecordType::A, "10.0.0.1")],
                );
                reply.response.truncated = true;
                Ok(reply)
            }
            Behavior::WrongName => Ok(Self::reply(
                ResponseCode::NoError,
                vec![AnswerRecord::new("elsewhere.example.", RecordType::A, "10.9.9.9")],
            )),
        }
    }
}
