#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock answers each query.
#[derive(Debug, Clone, Copy)]
pub enum MockMode {
    /// One A record for the queried name.
    A(Ipv4Addr),
    /// CNAME from the queried name to `alias.example.`, then an A for it.
    CnameThenA(Ipv4Addr),
    /// SERVFAIL with an empty answer section.
    ServFail,
    /// NXDOMAIN with an empty answer section.
    NxDomain,
    /// Reads queries and never answers.
    Silent,
    /// Sends a datagram with a foreign ID before the real answer.
    WrongIdFirst(Ipv4Addr),
    /// Echoes the ID followed by bytes that do not decode.
    Garbage,
}

/// Minimal UDP DNS server for tests that must not touch real DNS.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Binds an OS-assigned port on localhost and starts answering.
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            for response in Self::build_responses(&buf[..len], mode) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_responses(query: &[u8], mode: MockMode) -> Vec<Vec<u8>> {
        if query.len() < 12 {
            return vec![];
        }

        match mode {
            MockMode::A(ip) => vec![Self::answer(query, 0, &[Self::a_record(&[0xc0, 0x0c], ip)])],
            MockMode::CnameThenA(ip) => {
                let alias = encode_name("alias.example");
                let cname = Self::record(&[0xc0, 0x0c], 5, &alias);
                let a = Self::a_record(&alias, ip);
                vec![Self::answer(query, 0, &[cname, a])]
            }
            MockMode::ServFail => vec![Self::answer(query, 2, &[])],
            MockMode::NxDomain => vec![Self::answer(query, 3, &[])],
            MockMode::Silent => vec![],
            MockMode::WrongIdFirst(ip) => {
                let good = Self::answer(query, 0, &[Self::a_record(&[0xc0, 0x0c], ip)]);
                let mut bad = good.clone();
                bad[0] ^= 0xff;
                vec![bad, good]
            }
            MockMode::Garbage => vec![vec![query[0], query[1], 0x81, 0x80, 0x00]],
        }
    }

    fn answer(query: &[u8], rcode: u8, records: &[Vec<u8>]) -> Vec<u8> {
        let mut response = Vec::with_capacity(512);

        // Transaction ID
        response.extend_from_slice(&query[0..2]);

        // QR=1, RD=1; RA=1 plus rcode
        response.push(0x81);
        response.push(0x80 | (rcode & 0x0f));

        // Questions count (from query)
        response.extend_from_slice(&query[4..6]);

        response.extend_from_slice(&(records.len() as u16).to_be_bytes());

        // Authority and additional: 0
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        // Question section
        response.extend_from_slice(&query[12..]);

        for record in records {
            response.extend_from_slice(record);
        }
        response
    }

    fn a_record(owner: &[u8], ip: Ipv4Addr) -> Vec<u8> {
        Self::record(owner, 1, &ip.octets())
    }

    fn record(owner: &[u8], rtype: u16, rdata: &[u8]) -> Vec<u8> {
        let mut record = owner.to_vec();
        record.extend_from_slice(&rtype.to_be_bytes());
        // Class IN, TTL 60
        record.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x3c]);
        record.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        record.extend_from_slice(rdata);
        record
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
