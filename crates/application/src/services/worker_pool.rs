use crate::use_cases::ResolveLineUseCase;
use bulkdns_domain::{DomainError, InputLine, ResolutionResult};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fixed-size pool of resolver workers fed through a bounded task queue.
///
/// The queue holds as many lines as there are workers, so a producer that
/// outruns the network blocks on [`RunningPool::submit`] instead of
/// buffering the whole input.
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Starts the workers. Each result is sent on `results` as soon as its
    /// line reaches a terminal state.
    pub fn spawn(
        &self,
        resolver: Arc<ResolveLineUseCase>,
        results: mpsc::Sender<ResolutionResult>,
    ) -> RunningPool {
        let (tasks_tx, tasks_rx) = mpsc::channel::<InputLine>(self.size);
        let tasks_rx = Arc::new(Mutex::new(tasks_rx));

        let workers = (0..self.size)
            .map(|id| {
                let tasks = Arc::clone(&tasks_rx);
                let resolver = Arc::clone(&resolver);
                let results = results.clone();
                tokio::spawn(worker(id, tasks, resolver, results))
            })
            .collect();

        debug!(workers = self.size, "Worker pool started");

        RunningPool {
            tasks: tasks_tx,
            workers,
        }
    }
}

async fn worker(
    id: usize,
    tasks: Arc<Mutex<mpsc::Receiver<InputLine>>>,
    resolver: Arc<ResolveLineUseCase>,
    results: mpsc::Sender<ResolutionResult>,
) {
    loop {
        let next = tasks.lock().await.recv().await;
        let Some(line) = next else {
            break;
        };

        let result = resolver.execute(&line).await;
        if results.send(result).await.is_err() {
            warn!(worker = id, "Result channel closed, worker stopping");
            break;
        }
    }
}

pub struct RunningPool {
    tasks: mpsc::Sender<InputLine>,
    workers: Vec<JoinHandle<()>>,
}

impl RunningPool {
    /// Enqueues one line, waiting while the queue is full.
    pub async fn submit(&self, line: InputLine) -> Result<(), DomainError> {
        self.tasks
            .send(line)
            .await
            .map_err(|_| DomainError::IoError("worker pool is no longer accepting tasks".into()))
    }

    /// Closes the queue and waits for every worker to drain it and exit.
    /// Returns the number of workers that exited normally.
    pub async fn shutdown(self) -> usize {
        drop(self.tasks);

        let mut finished = 0;
        for handle in self.workers {
            match handle.await {
                Ok(()) => finished += 1,
                Err(e) => warn!(error = %e, "Worker task failed"),
            }
        }
        debug!(finished, "Worker pool stopped");
        finished
    }
}
