use bulkdns_domain::{DomainError, ResolutionResult};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub resolved: usize,
    pub empty: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, result: &ResolutionResult) {
        self.total += 1;
        match (&result.error, result.addresses.is_empty()) {
            (Some(_), _) => self.failed += 1,
            (None, true) => self.empty += 1,
            (None, false) => self.resolved += 1,
        }
    }
}

/// Writes one output line per result, in completion order.
///
/// The collector owns the output stream, so lines from concurrent workers
/// can never interleave. Each line is flushed as soon as it is written.
pub struct Collector<W> {
    writer: W,
    preserve_input: bool,
}

impl<W: AsyncWrite + Unpin> Collector<W> {
    pub fn new(writer: W, preserve_input: bool) -> Self {
        Self {
            writer,
            preserve_input,
        }
    }

    /// Consumes exactly `expected` results and stops. If every sender goes
    /// away first, the shortfall is logged and the partial summary returned.
    pub async fn run(
        &mut self,
        results: &mut mpsc::Receiver<ResolutionResult>,
        expected: usize,
    ) -> Result<RunSummary, DomainError> {
        let mut summary = RunSummary::default();

        while summary.total < expected {
            let Some(result) = results.recv().await else {
                error!(
                    expected,
                    received = summary.total,
                    "Result channel closed before every line was reported"
                );
                break;
            };

            if let Some(ref e) = result.error {
                warn!(
                    domain = %result.domain,
                    server = ?result.server,
                    attempts = result.attempts,
                    error = %e,
                    "failed"
                );
            }

            self.emit(&result).await?;
            summary.record(&result);
        }

        Ok(summary)
    }

    async fn emit(&mut self, result: &ResolutionResult) -> Result<(), DomainError> {
        let mut line = result.format_line(self.preserve_input);
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
