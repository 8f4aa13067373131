use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// DNS query (domain + record type).
/// Uses `Arc<str>` so every retry of the same line shares one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Picks the lookup for an input token: IP literals become a PTR query on
    /// their reverse name, everything else an A query.
    pub fn for_target(target: &str) -> Self {
        match target.parse::<IpAddr>() {
            Ok(ip) => Self::new(reverse_domain(&ip), RecordType::PTR),
            Err(_) => Self::new(target, RecordType::A),
        }
    }

    pub fn is_reverse(&self) -> bool {
        self.record_type == RecordType::PTR
    }
}

pub fn reverse_domain(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}
