//! Bounded worker pool for blocking lookups.
//!
//! A thin semaphore over tokio's blocking thread pool: at most
//! `capacity` submitted jobs run at once, process-wide. Jobs are never
//! cancelled once submitted and the pool enforces no timeout of its
//! own; a hung job holds its permit until the underlying call returns.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::error::TravelError;

/// Default concurrency ceiling.
pub const DEFAULT_POOL_CAPACITY: usize = 12;

/// Fixed-capacity worker pool shared for the lifetime of the process.
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Create a pool running at most `capacity` jobs concurrently.
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Submit a blocking job. Returns immediately with a handle; the
    /// job starts once a permit frees up and runs to completion or
    /// failure regardless of sibling outcomes.
    pub fn submit<T, F>(&self, job: F) -> JoinHandle<Result<T, TravelError>>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, TravelError> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| TravelError::TaskFailed(e.to_string()))?;
            tokio::task::spawn_blocking(job)
                .await
                .map_err(|e| TravelError::TaskFailed(e.to_string()))?
        })
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}
