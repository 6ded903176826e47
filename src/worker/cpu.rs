//! CPU-based worker for vanity address generation.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use crate::crypto::{CoinAddress, RippleAddress, Scalar};
use crate::error::Result;
use crate::matcher::{KeyType, MatchResult, Pattern};

use super::{Found, SearchLimits, SearchMode, VanityResult};

/// Attempts between sampled progress events.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total keys generated
    pub keys_generated: AtomicU64,
    /// Matches found
    pub matches_found: AtomicU64,
    /// Workers still running
    pub active_workers: AtomicUsize,
    /// Set once by the worker whose result is kept
    result_claimed: AtomicBool,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total keys generated.
    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }

    /// Reserves the next attempt number, or `None` once `max_attempts` are used up.
    fn next_attempt(&self, max_attempts: Option<u64>) -> Option<u64> {
        match max_attempts {
            None => Some(self.keys_generated.fetch_add(1, Ordering::Relaxed) + 1),
            Some(max) => self
                .keys_generated
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                    (n < max).then_some(n + 1)
                })
                .ok()
                .map(|n| n + 1),
        }
    }

    /// Returns true for exactly one caller: the worker whose result is kept.
    fn claim_result(&self) -> bool {
        self.result_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// A CPU worker that generates and tests keys.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// The pattern to match against
    pattern: Pattern,
    /// What kind of key to generate
    mode: SearchMode,
    max_attempts: Option<u64>,
    deadline: Option<Instant>,
    /// Channel to send results
    result_tx: Sender<VanityResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    ///
    /// The deadline is measured from `started`, the creation time of the pool.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        pattern: Pattern,
        mode: SearchMode,
        limits: SearchLimits,
        started: Instant,
        result_tx: Sender<VanityResult>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            pattern,
            mode,
            max_attempts: limits.max_attempts,
            deadline: limits.timeout.map(|timeout| started + timeout),
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the worker loop with the thread-local CSPRNG.
    pub fn run(&self) {
        self.run_with(&mut rand::thread_rng());
    }

    /// Runs the worker loop.
    ///
    /// Generates keys and tests them against the pattern until:
    /// - A match is found (first reporter sends its result and raises the stop flag)
    /// - Stop flag is set
    /// - The attempt budget is spent or the deadline passes
    pub fn run_with<R: RngCore + CryptoRng>(&self, rng: &mut R) {
        loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                debug!(worker = self.id, "deadline reached");
                self.stop_flag.store(true, Ordering::Relaxed);
                break;
            }
            let Some(attempt) = self.stats.next_attempt(self.max_attempts) else {
                debug!(worker = self.id, "attempt budget spent");
                break;
            };
            if attempt % PROGRESS_INTERVAL == 0 {
                debug!(worker = self.id, attempt, "searching");
            }

            match self.attempt(rng, attempt) {
                Ok(Some(found)) => {
                    self.report(found, attempt);
                    break;
                }
                Ok(None) => {}
                Err(e) => warn!(worker = self.id, attempt, error = %e, "candidate rejected"),
            }
        }

        self.stats.active_workers.fetch_sub(1, Ordering::AcqRel);
    }

    /// Generates one candidate and returns it if it matches.
    fn attempt<R: RngCore + CryptoRng>(&self, rng: &mut R, attempt: u64) -> Result<Option<Found>> {
        match &self.mode {
            SearchMode::Coin { version, key_type } => {
                let key = CoinAddress::generate_with(*version, rng);
                Ok(self.check_coin(key, *key_type, attempt))
            }
            SearchMode::Combined {
                version,
                key_type,
                combine,
                public_key,
            } => {
                let partial = Scalar::random(rng);
                let point = combine.combine_point(public_key, &partial)?;
                let key = CoinAddress::from_point(*version, partial, point);
                Ok(self.check_coin(key, *key_type, attempt))
            }
            SearchMode::Ripple => {
                let account = RippleAddress::generate_with(rng)?;
                Ok(self
                    .inspect(&account.account_id, attempt)
                    .then(|| Found::Ripple(account)))
            }
        }
    }

    fn check_coin(&self, key: CoinAddress, key_type: KeyType, attempt: u64) -> Option<Found> {
        let form = key_type
            .forms()
            .iter()
            .copied()
            .find(|&form| self.inspect(key.address(form).as_str(), attempt))?;
        Some(Found::Coin { key, form })
    }

    /// Runs the cheap filter and then the full comparison on one address.
    fn inspect(&self, address: &str, attempt: u64) -> bool {
        match self.pattern.matches(address) {
            MatchResult::Match => true,
            MatchResult::Partial => {
                debug!(worker = self.id, attempt, address, "candidate passed prefix filter");
                false
            }
            MatchResult::NoMatch => false,
        }
    }

    /// Sends the result if no other worker got there first, then stops the pool.
    fn report(&self, found: Found, attempt: u64) {
        if !self.stats.claim_result() {
            debug!(worker = self.id, attempt, "match discarded, result already claimed");
            return;
        }
        self.stats.matches_found.fetch_add(1, Ordering::Relaxed);

        let result = VanityResult::new(found, self.id, attempt);
        info!(worker = self.id, attempt, address = %result.address, "match found");

        // Capacity one and a single claimant, so this never blocks.
        let _ = self.result_tx.send(result);
        self.stop_flag.store(true, Ordering::Release);
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}
