use super::ResolveLineUseCase;
use crate::services::{Collector, RunSummary, WorkerPool};
use bulkdns_domain::{DomainError, InputLine, ResolutionResult};
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Runs a whole batch: feeds every line through the worker pool and lets the
/// collector emit results until each line has produced exactly one.
pub struct BulkResolveUseCase {
    resolver: Arc<ResolveLineUseCase>,
    pool: WorkerPool,
}

impl BulkResolveUseCase {
    pub fn new(resolver: Arc<ResolveLineUseCase>, concurrency: usize) -> Self {
        Self {
            resolver,
            pool: WorkerPool::new(concurrency),
        }
    }

    pub async fn execute<W: AsyncWrite + Unpin>(
        &self,
        lines: Vec<InputLine>,
        collector: &mut Collector<W>,
    ) -> Result<RunSummary, DomainError> {
        let expected = lines.len();
        if expected == 0 {
            return Ok(RunSummary::default());
        }

        info!(
            lines = expected,
            workers = self.pool.size(),
            servers = self.resolver.ring().len(),
            "Starting bulk resolution"
        );

        let (results_tx, mut results_rx) = mpsc::channel::<ResolutionResult>(self.pool.size());
        let pool = self.pool.spawn(Arc::clone(&self.resolver), results_tx);

        let producer = tokio::spawn(async move {
            for line in lines {
                if let Err(e) = pool.submit(line).await {
                    warn!(error = %e, "Stopped feeding the worker pool");
                    break;
                }
            }
            pool.shutdown().await
        });

        let summary = collector.run(&mut results_rx, expected).await;
        // Unblock any worker still waiting to send before joining the producer.
        drop(results_rx);

        if let Err(e) = producer.await {
            warn!(error = %e, "Producer task failed");
        }

        let summary = summary?;
        info!(
            total = summary.total,
            resolved = summary.resolved,
            empty = summary.empty,
            failed = summary.failed,
            "Bulk resolution finished"
        );
        Ok(summary)
    }
}
