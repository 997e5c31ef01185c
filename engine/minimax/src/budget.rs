//! Time budget and adaptive depth control.

use std::time::{Duration, Instant};

/// Share of the configured time a search may use before it must return.
pub const PERCENTAGE_THRESHOLD: u32 = 90;

/// Fractional depth gained after a search that finished in time.
pub const DEPTH_STEP: f64 = 0.25;

/// Wall-clock budget for a single search. Create one per turn.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    pub fn new(max_time: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit: max_time * PERCENTAGE_THRESHOLD / 100,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The safety-scaled limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// True once the elapsed time has reached the safety-scaled limit.
    pub fn should_return(&self) -> bool {
        self.elapsed() >= self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Binary search over `lo..=hi`, trying the upper midpoint.
    Coarse { lo: usize, hi: usize },
    /// Linear adjustment around a settled depth.
    Fine,
}

/// Adjusts search depth between turns so searches fit the time budget.
///
/// Starts by halving `[min, max]` each turn: a timeout lowers the upper
/// bound, a completed search raises the lower one. When the interval
/// collapses it switches to small linear steps: down by one after a
/// timeout, up by [`DEPTH_STEP`] otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthManager {
    min: usize,
    max: usize,
    current: f64,
    phase: Phase,
}

impl DepthManager {
    pub fn new(min: usize, max: usize) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        // A zero-depth search has no move to return
        let min = min.max(1);
        let max = max.max(min);
        let mut manager = Self {
            min,
            max,
            current: min as f64,
            phase: Phase::Coarse { lo: min, hi: max },
        };
        manager.settle();
        manager
    }

    /// Depth to search this turn.
    pub fn depth(&self) -> usize {
        self.current.floor() as usize
    }

    pub fn is_fine(&self) -> bool {
        self.phase == Phase::Fine
    }

    /// Feed back whether the last search at [`Self::depth`] timed out.
    pub fn record(&mut self, timed_out: bool) {
        match self.phase {
            Phase::Coarse { lo, hi } => {
                let tried = self.depth();
                self.phase = if timed_out {
                    Phase::Coarse {
                        lo,
                        hi: tried.saturating_sub(1).max(lo),
                    }
                } else {
                    Phase::Coarse { lo: tried, hi }
                };
                self.settle();
            }
            Phase::Fine => {
                self.current = if timed_out {
                    (self.current - 1.0).max(self.min as f64)
                } else {
                    (self.current + DEPTH_STEP).min(self.max as f64)
                };
            }
        }
    }

    /// Pick the next coarse depth, or switch to fine mode once settled.
    fn settle(&mut self) {
        if let Phase::Coarse { lo, hi } = self.phase {
            if lo >= hi {
                self.phase = Phase::Fine;
                self.current = lo as f64;
            } else {
                self.current = ((lo + hi + 1) / 2) as f64;
            }
        }
    }
}
