use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::retry::{AttemptCap, RotationPolicy};

/// Bulk resolution engine settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Number of concurrent workers, also the task queue capacity (default: 250)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-attempt lookup timeout in milliseconds, raced against the
    /// exchange (default: 5000)
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_ms: u64,

    /// Transport timeouts in milliseconds
    #[serde(default = "default_dial_timeout")]
    pub dial_timeout_ms: u64,
    #[serde(default = "default_write_timeout")]
    pub write_timeout_ms: u64,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,

    /// Maximum attempts per line
    /// Options: { fixed = N }, "half_ring", "ring_size"
    #[serde(default)]
    pub attempt_cap: AttemptCap,

    /// Server choice on retry
    /// Options: "rotate", "same_server"
    #[serde(default)]
    pub rotation: RotationPolicy,
}

impl EngineConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            lookup_timeout_ms: default_lookup_timeout(),
            dial_timeout_ms: default_dial_timeout(),
            write_timeout_ms: default_write_timeout(),
            read_timeout_ms: default_read_timeout(),
            attempt_cap: AttemptCap::default(),
            rotation: RotationPolicy::default(),
        }
    }
}

fn default_concurrency() -> usize {
    250
}

fn default_lookup_timeout() -> u64 {
    5000
}

fn default_dial_timeout() -> u64 {
    3000
}

fn default_write_timeout() -> u64 {
    3000
}

fn default_read_timeout() -> u64 {
    5000
}
