use bulkdns_domain::config::ServersConfig;
use bulkdns_domain::DomainError;
use bulkdns_infrastructure::system::load_nameservers;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Configured servers first, then the system nameservers when enabled.
/// Duplicates keep their first position.
pub async fn collect_servers(config: &ServersConfig) -> anyhow::Result<Vec<SocketAddr>> {
    let mut servers = config.socket_addrs()?;

    if config.use_system_resolvers {
        match load_nameservers(&config.resolv_conf).await {
            Ok(system) => {
                info!(path = %config.resolv_conf, count = system.len(), "System nameservers added");
                servers.extend(system);
            }
            Err(e) => warn!(path = %config.resolv_conf, error = %e, "Could not read system nameservers"),
        }
    }

    let servers = dedup(servers);
    if servers.is_empty() {
        return Err(DomainError::NoServersAvailable.into());
    }
    Ok(servers)
}

fn dedup(servers: Vec<SocketAddr>) -> Vec<SocketAddr> {
    let mut unique = Vec::with_capacity(servers.len());
    for server in servers {
        if !unique.contains(&server) {
            unique.push(server);
        }
    }
    unique
}
