use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Startup health probe for the configured DNS servers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthCheckConfig {
    /// Probe every server before resolving (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Well-known domain used as the trial lookup (default: "google.com")
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Probe timeout in milliseconds (default: 5000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

impl HealthCheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            domain: default_domain(),
            timeout_ms: default_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_domain() -> String {
    "google.com".to_string()
}

fn default_timeout() -> u64 {
    5000
}
