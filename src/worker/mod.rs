//! Worker pool for parallel vanity address generation.
//!
//! This module provides:
//! - Multi-threaded CPU workers polling a shared stop flag
//! - First-reporter-wins result hand-off over a single slot channel
//! - Attempt budget, deadline and progress tracking

mod cpu;
mod pool;

pub use cpu::{CpuWorker, WorkerStats, PROGRESS_INTERVAL};
pub use pool::{Found, SearchLimits, SearchMode, VanityResult, WorkerPool};
