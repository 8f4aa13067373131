//! Configuration module for bulkdns
//!
//! - `root`: main configuration, file loading and CLI overrides
//! - `engine`: worker pool size and timeouts
//! - `retry`: attempt cap and server rotation policies
//! - `servers`: the DNS server list seeding the ring
//! - `health`: startup health probe
//! - `output`: result line formatting
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod engine;
pub mod errors;
pub mod health;
pub mod logging;
pub mod output;
pub mod retry;
pub mod root;
pub mod servers;

pub use engine::EngineConfig;
pub use errors::ConfigError;
pub use health::HealthCheckConfig;
pub use logging::LoggingConfig;
pub use output::OutputConfig;
pub use retry::{AttemptCap, RetryPolicy, RotationPolicy};
pub use root::{CliOverrides, Config};
pub use servers::{parse_server_addr, ServersConfig};
