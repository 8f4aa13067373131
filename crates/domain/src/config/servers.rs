use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

const DEFAULT_DNS_PORT: u16 = 53;

/// DNS servers seeding the ring
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServersConfig {
    /// Server addresses, `ip` or `ip:port` (default: public resolvers)
    #[serde(default = "default_servers")]
    pub list: Vec<String>,

    /// Append the nameservers from the system resolver configuration
    #[serde(default)]
    pub use_system_resolvers: bool,

    /// Path of the system resolver configuration (default: "/etc/resolv.conf")
    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,
}

impl ServersConfig {
    pub fn socket_addrs(&self) -> Result<Vec<SocketAddr>, DomainError> {
        self.list.iter().map(|s| parse_server_addr(s)).collect()
    }
}

impl Default for ServersConfig {
    fn default() -> Self {
        Self {
            list: default_servers(),
            use_system_resolvers: false,
            resolv_conf: default_resolv_conf(),
        }
    }
}

/// Parses `ip` or `ip:port`; a bare IP gets port 53.
pub fn parse_server_addr(server: &str) -> Result<SocketAddr, DomainError> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| DomainError::InvalidServerAddress(server.to_string()))
}

// More public DNS servers:
//     https://www.grc.com/dns/alternatives.htm
fn default_servers() -> Vec<String> {
    [
        "8.8.8.8",         // Google
        "8.8.4.4",         // Google
        "129.250.35.250",  // Verio
        "129.250.35.251",  // Verio
        "209.244.0.3",     // Level3
        "209.244.0.4",     // Level3
        "4.2.2.1",         // Verizon
        "4.2.2.2",         // Verizon
        "173.230.156.28",  // OpenNIC
        "172.246.141.148", // OpenNIC
        "23.90.4.6",       // OpenNIC
        "23.226.230.72",   // OpenNIC
        "68.87.85.98",     // Comcast
        "68.87.76.178",    // Comcast
        "68.87.78.130",    // Comcast
        "68.87.69.146",    // Comcast
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}
