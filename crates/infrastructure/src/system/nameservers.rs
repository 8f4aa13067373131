use bulkdns_domain::DomainError;
use ::resolv_conf::{Config as ResolvConfig, ScopedIp};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tracing::{debug, warn};

const DNS_PORT: u16 = 53;

/// Reads the `nameserver` entries of a resolv.conf file, in file order.
pub async fn load_nameservers(path: impl AsRef<Path>) -> Result<Vec<SocketAddr>, DomainError> {
    let path = path.as_ref();
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;

    let servers = parse_nameservers(&contents)?;
    if servers.is_empty() {
        warn!(path = %path.display(), "No nameserver entries found");
    } else {
        debug!(path = %path.display(), count = servers.len(), "Loaded system nameservers");
    }
    Ok(servers)
}

pub fn parse_nameservers(contents: &[u8]) -> Result<Vec<SocketAddr>, DomainError> {
    let config = ResolvConfig::parse(contents)
        .map_err(|e| DomainError::IoError(format!("invalid resolv.conf: {}", e)))?;

    Ok(config
        .nameservers
        .into_iter()
        .map(|ns| {
            let ip = match ns {
                ScopedIp::V4(v4) => IpAddr::V4(v4),
                ScopedIp::V6(v6, _) => IpAddr::V6(v6),
            };
            SocketAddr::new(ip, DNS_PORT)
        })
        .collect())
}
