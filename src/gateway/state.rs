use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Semaphore;

use crate::workload::HashSeed;

/// Bounded number of concurrently served requests.
#[derive(Debug, Clone)]
pub struct InFlightLimit {
    semaphore: Arc<Semaphore>,
    max: usize,
}

impl InFlightLimit {
    pub fn new(max: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Permits not currently held by a request
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub(crate) fn semaphore(&self) -> Arc<Semaphore> {
        self.semaphore.clone()
    }
}

/// Gateway shared state
#[derive(Debug)]
pub struct AppState {
    /// Process-wide hash seed
    pub seed: HashSeed,
    /// Requests accepted so far (log correlation only)
    served: AtomicU64,
    /// None = unbounded concurrency
    pub limit: Option<InFlightLimit>,
}

impl AppState {
    pub fn new(seed: HashSeed, max_in_flight: Option<usize>) -> Self {
        Self {
            seed,
            served: AtomicU64::new(0),
            limit: max_in_flight.map(InFlightLimit::new),
        }
    }

    /// Bump the request counter, returning this request's 1-based number.
    pub fn next_request_no(&self) -> u64 {
        self.served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }
}
