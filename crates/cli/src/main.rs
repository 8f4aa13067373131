//! # bulkdns
//!
//! Resolves a list of domains read from stdin against a ring of DNS
//! servers and writes one result line per input to stdout.

mod bootstrap;

use bootstrap::{collect_servers, init_logging, load_config, log_summary, read_input};
use bulkdns_application::services::{Collector, ServerRing};
use bulkdns_application::use_cases::{BulkResolveUseCase, ResolveLineUseCase};
use bulkdns_domain::{CliOverrides, DnsQuery, RetryPolicy};
use bulkdns_infrastructure::dns::transport::ExchangeTimeouts;
use bulkdns_infrastructure::dns::HickoryExchange;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "bulkdns")]
#[command(version)]
#[command(about = "Resolve a list of domains concurrently against a pool of DNS servers")]
struct Cli {
    /// Label each result with the original input line instead of the cleaned domain
    #[arg(short = 'p', long)]
    preserve: bool,

    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Number of concurrent workers
    #[arg(short = 'n', long)]
    concurrency: Option<usize>,

    /// DNS server (`ip` or `ip:port`); repeat to build the list
    #[arg(short = 's', long = "server")]
    servers: Vec<String>,

    /// Add the nameservers from /etc/resolv.conf
    #[arg(long)]
    system_resolvers: bool,

    /// Skip the startup server probe
    #[arg(long)]
    no_health_check: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            concurrency: self.concurrency,
            servers: (!self.servers.is_empty()).then(|| self.servers.clone()),
            use_system_resolvers: self.system_resolvers.then_some(true),
            health_check: self.no_health_check.then_some(false),
            preserve_input: self.preserve.then_some(true),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.overrides())?;
    init_logging(&config);
    log_summary(&config, cli.config.as_deref());

    let exchange = Arc::new(HickoryExchange::new(ExchangeTimeouts::from(&config.engine)));
    let ring = Arc::new(ServerRing::new(collect_servers(&config.servers).await?)?);

    if config.health_check.enabled {
        let probe = DnsQuery::for_target(&config.health_check.domain);
        ring.health_check(exchange.as_ref(), &probe, config.health_check.timeout())
            .await?;
    }

    let lines = read_input(tokio::io::stdin()).await?;

    let resolver = Arc::new(ResolveLineUseCase::new(
        exchange,
        Arc::clone(&ring),
        RetryPolicy::from(&config.engine),
    ));
    let bulk = BulkResolveUseCase::new(resolver, config.engine.concurrency);
    let mut collector = Collector::new(tokio::io::stdout(), config.output.preserve_input);

    let summary = bulk.execute(lines, &mut collector).await?;

    info!(
        total = summary.total,
        resolved = summary.resolved,
        empty = summary.empty,
        failed = summary.failed,
        servers = ring.len(),
        "Done"
    );

    Ok(())
}
