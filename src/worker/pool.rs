//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::crypto::{CoinAddress, KeyForm, PublicPoint, RippleAddress, Scalar};
use crate::error::{Error, Result};
use crate::matcher::{Combine, KeyType, Pattern};

use super::cpu::{CpuWorker, WorkerStats};

/// What each attempt generates.
#[derive(Debug, Clone)]
pub enum SearchMode {
    /// Fresh key pairs for one network.
    Coin { version: u8, key_type: KeyType },
    /// Partial keys combined with a requester's public key.
    Combined {
        version: u8,
        key_type: KeyType,
        combine: Combine,
        public_key: PublicPoint,
    },
    /// Ripple accounts from fresh seeds.
    Ripple,
}

/// Caller supplied bounds on a search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Total attempts across all workers
    pub max_attempts: Option<u64>,
    pub timeout: Option<Duration>,
}

/// The matching key material.
#[derive(Debug, Clone)]
pub enum Found {
    /// For a combined search `key.private_key` is the partial key and the
    /// addresses belong to the combined public key.
    Coin { key: CoinAddress, form: KeyForm },
    Ripple(RippleAddress),
}

/// Result of a successful vanity address generation.
#[derive(Debug, Clone)]
pub struct VanityResult {
    pub found: Found,
    /// The matching address
    pub address: String,
    /// The ID of the worker that found this result
    pub worker_id: usize,
    /// Pool-wide attempt number of the match
    pub attempts: u64,
}

impl VanityResult {
    pub(crate) fn new(found: Found, worker_id: usize, attempts: u64) -> Self {
        let address = match &found {
            Found::Coin { key, form } => key.address(*form).to_string(),
            Found::Ripple(account) => account.account_id.clone(),
        };
        Self {
            found,
            address,
            worker_id,
            attempts,
        }
    }

    /// The private key found by the search (partial key for combined searches).
    pub fn private_key(&self) -> Scalar {
        match &self.found {
            Found::Coin { key, .. } => key.private_key,
            Found::Ripple(account) => account.private_key,
        }
    }
}

/// Manages a pool of workers for parallel vanity address generation.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// The pattern to search for
    pattern: Pattern,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for results
    result_rx: Receiver<VanityResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Creates a new worker pool with the specified number of workers.
    pub fn new(
        num_workers: usize,
        pattern: Pattern,
        mode: SearchMode,
        limits: SearchLimits,
    ) -> Result<Self> {
        // One slot: only the claiming worker ever sends.
        let (result_tx, result_rx) = bounded(1);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());
        let start_time = Instant::now();

        let handles = Self::spawn_workers(
            num_workers,
            &pattern,
            &mode,
            limits,
            start_time,
            result_tx,
            &stop_flag,
            &stats,
        )?;

        Ok(Self {
            num_workers,
            pattern,
            handles: Some(handles),
            result_rx,
            stop_flag,
            stats,
            start_time,
        })
    }

    /// Runs a search to completion on `num_workers` threads.
    ///
    /// Returns `None` when the limits are reached without a match.
    pub fn search(
        num_workers: usize,
        pattern: Pattern,
        mode: SearchMode,
        limits: SearchLimits,
    ) -> Result<Option<VanityResult>> {
        let pool = Self::new(num_workers, pattern, mode, limits)?;
        let result = pool.wait();
        pool.join();
        Ok(result)
    }

    /// Spawns worker threads.
    #[allow(clippy::too_many_arguments)]
    fn spawn_workers(
        num_workers: usize,
        pattern: &Pattern,
        mode: &SearchMode,
        limits: SearchLimits,
        started: Instant,
        result_tx: Sender<VanityResult>,
        stop_flag: &Arc<AtomicBool>,
        stats: &Arc<WorkerStats>,
    ) -> Result<Vec<JoinHandle<()>>> {
        let mut handles = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let worker = CpuWorker::new(
                id,
                pattern.clone(),
                mode.clone(),
                limits,
                started,
                result_tx.clone(),
                stop_flag.clone(),
                stats.clone(),
            );
            stats.active_workers.fetch_add(1, Ordering::AcqRel);

            let spawned = thread::Builder::new()
                .name(format!("vanity-worker-{}", id))
                .spawn(move || worker.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    stats.active_workers.fetch_sub(1, Ordering::AcqRel);
                    stop_flag.store(true, Ordering::Relaxed);
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(Error::WorkerSpawn(e.to_string()));
                }
            }
        }
        Ok(handles)
    }

    /// Blocks until a result arrives or every worker has stopped.
    pub fn wait(&self) -> Option<VanityResult> {
        // Workers drop their senders on exit, which ends the wait.
        self.result_rx.recv().ok()
    }

    /// Waits for a result with optional timeout.
    ///
    /// Returns `Some(result)` if a match is found, `None` if timeout expires.
    pub fn wait_for_result(&self, timeout: Duration) -> Option<VanityResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }

    /// Attempts to receive a result without blocking.
    pub fn try_recv(&self) -> Option<VanityResult> {
        self.result_rx.try_recv().ok()
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Waits for all workers to complete.
    pub fn join(mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the pattern being searched for.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the total keys generated across all workers.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    /// Returns true once every worker has left its loop.
    pub fn is_finished(&self) -> bool {
        self.stats.active_workers.load(Ordering::Acquire) == 0
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_keys() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
        // Wait for workers to finish if they haven't been joined
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }
}
