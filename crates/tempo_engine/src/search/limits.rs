//! Time budget and cooperative cancellation
//!
//! A decision gets `remaining / allotted_divisor` of the host's clock as a
//! hard limit, checked from inside the recursion every
//! `node_check_interval` nodes. The iterative driver also uses a much smaller
//! soft threshold (`allotted / threshold_divisor`): once it has passed, no
//! new iteration is started.
//!
//! Hitting either the hard limit or a raised [`StopFlag`] makes the search
//! unwind with [`Interrupted`]. That is a control-flow signal, not an error:
//! the driver still returns the best move found so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use web_time::Instant;

use crate::config::SearchConfig;

/// Time the host has left on its clock for the rest of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    pub remaining_ms: u64,
}

impl TimeBudget {
    pub fn from_millis(remaining_ms: u64) -> Self {
        TimeBudget { remaining_ms }
    }

    pub fn from_duration(remaining: Duration) -> Self {
        TimeBudget {
            remaining_ms: u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// The search was stopped by the deadline or the stop flag
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search interrupted")]
pub struct Interrupted;

/// Shared cancellation switch
///
/// Clones share the same flag, so a host can keep one clone and raise it from
/// another thread while the engine is thinking.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Wall clock for one decision
#[derive(Debug, Clone, Copy)]
pub struct SearchClock {
    start: Instant,
    allotted: Duration,
    threshold: Duration,
}

impl SearchClock {
    pub fn start(budget: TimeBudget, config: &SearchConfig) -> Self {
        let allotted_ms = budget.remaining_ms / config.allotted_divisor.max(1);
        let threshold_ms = allotted_ms / config.threshold_divisor.max(1);
        SearchClock {
            start: Instant::now(),
            allotted: Duration::from_millis(allotted_ms),
            threshold: Duration::from_millis(threshold_ms),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Time left before the hard limit
    pub fn remaining_ms(&self) -> u64 {
        u64::try_from(self.allotted.saturating_sub(self.elapsed()).as_millis())
            .unwrap_or(u64::MAX)
    }

    pub fn allotted(&self) -> Duration {
        self.allotted
    }

    /// Hard limit reached: abort the search in progress
    pub fn hard_expired(&self) -> bool {
        self.elapsed() >= self.allotted
    }

    /// Soft threshold reached: do not start another iteration
    pub fn soft_expired(&self) -> bool {
        self.elapsed() >= self.threshold
    }
}

/// Everything the recursion polls to decide whether to keep going
#[derive(Debug, Clone)]
pub struct Limits {
    pub clock: SearchClock,
    pub stop: StopFlag,
    pub check_interval: u64,
}

impl Limits {
    pub fn new(clock: SearchClock, stop: StopFlag, check_interval: u64) -> Self {
        Limits {
            clock,
            stop,
            check_interval: check_interval.max(1),
        }
    }

    /// Called once per node with the running node count
    #[inline]
    pub fn poll(&self, nodes: u64) -> Result<(), Interrupted> {
        if nodes % self.check_interval == 0 && (self.stop.is_raised() || self.clock.hard_expired())
        {
            return Err(Interrupted);
        }
        Ok(())
    }
}
