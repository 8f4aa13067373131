use serde::{Deserialize, Serialize};
use std::path::Path;

use super::engine::EngineConfig;
use super::errors::ConfigError;
use super::health::HealthCheckConfig;
use super::logging::LoggingConfig;
use super::output::OutputConfig;
use super::retry::AttemptCap;
use super::servers::{parse_server_addr, ServersConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub servers: ServersConfig,

    #[serde(default)]
    pub health_check: HealthCheckConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub concurrency: Option<usize>,
    pub servers: Option<Vec<String>>,
    pub use_system_resolvers: Option<bool>,
    pub health_check: Option<bool>,
    pub preserve_input: Option<bool>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the TOML file if one is given, then applies CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(concurrency) = overrides.concurrency {
            self.engine.concurrency = concurrency;
        }
        if let Some(servers) = overrides.servers {
            self.servers.list = servers;
        }
        if let Some(use_system) = overrides.use_system_resolvers {
            self.servers.use_system_resolvers = use_system;
        }
        if let Some(enabled) = overrides.health_check {
            self.health_check.enabled = enabled;
        }
        if let Some(preserve) = overrides.preserve_input {
            self.output.preserve_input = preserve;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.concurrency == 0 {
            return Err(ConfigError::Validation(
                "engine.concurrency must be at least 1".into(),
            ));
        }
        let timeouts = [
            ("engine.lookup_timeout_ms", self.engine.lookup_timeout_ms),
            ("engine.dial_timeout_ms", self.engine.dial_timeout_ms),
            ("engine.write_timeout_ms", self.engine.write_timeout_ms),
            ("engine.read_timeout_ms", self.engine.read_timeout_ms),
            ("health_check.timeout_ms", self.health_check.timeout_ms),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Validation(format!("{} must be non-zero", name)));
        }
        if self.engine.attempt_cap == AttemptCap::Fixed(0) {
            return Err(ConfigError::Validation(
                "engine.attempt_cap fixed value must be at least 1".into(),
            ));
        }
        if self.servers.list.is_empty() && !self.servers.use_system_resolvers {
            return Err(ConfigError::Validation(
                "no DNS servers configured and system resolvers disabled".into(),
            ));
        }
        for server in &self.servers.list {
            parse_server_addr(server).map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        if self.health_check.enabled && self.health_check.domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "health_check.domain cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
