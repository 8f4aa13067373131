pub mod collector;
pub mod server_ring;
pub mod worker_pool;

pub use collector::{Collector, RunSummary};
pub use server_ring::ServerRing;
pub use worker_pool::{RunningPool, WorkerPool};
