use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::engine::EngineConfig;

/// Upper bound on attempts for a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptCap {
    /// Absolute number of attempts.
    Fixed(u32),
    /// Half the servers in the ring, at least one.
    HalfRing,
    /// One attempt per server in the ring.
    RingSize,
}

impl AttemptCap {
    pub fn max_attempts(&self, ring_len: usize) -> u32 {
        let attempts = match self {
            AttemptCap::Fixed(n) => *n as usize,
            AttemptCap::HalfRing => ring_len / 2,
            AttemptCap::RingSize => ring_len,
        };
        attempts.clamp(1, u32::MAX as usize) as u32
    }
}

impl Default for AttemptCap {
    fn default() -> Self {
        AttemptCap::Fixed(3)
    }
}

/// Which server a retry goes to after a failed attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Advance the shared ring before every retry.
    #[default]
    Rotate,
    /// Keep retrying the server that failed.
    SameServer,
}

/// Everything the resolver needs to decide on retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub lookup_timeout: Duration,
    pub attempt_cap: AttemptCap,
    pub rotation: RotationPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for RetryPolicy {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            lookup_timeout: engine.lookup_timeout(),
            attempt_cap: engine.attempt_cap,
            rotation: engine.rotation,
        }
    }
}
