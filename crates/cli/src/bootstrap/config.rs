use bulkdns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Call after logging is initialized.
pub fn log_summary(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        concurrency = config.engine.concurrency,
        servers = config.servers.list.len(),
        system_resolvers = config.servers.use_system_resolvers,
        health_check = config.health_check.enabled,
        "Configuration loaded"
    );
}
