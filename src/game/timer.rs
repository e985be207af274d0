use std::time::Duration;

/// Fixed-period ticker. Only accumulates while armed; disarming drops any
/// partial period so a re-armed timer starts from a clean interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    period: Duration,
    elapsed: Duration,
    armed: bool,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn set_armed(&mut self, armed: bool) {
        if self.armed != armed {
            self.elapsed = Duration::ZERO;
        }
        self.armed = armed;
    }

    /// Adds `dt` and reports how many whole periods completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed || self.period.is_zero() {
            return 0;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// A row advance scheduled after a classic-mode match. Only fires against the
/// round it was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub round: u64,
    pub remaining: Duration,
}

impl PendingAdvance {
    pub fn new(round: u64, delay: Duration) -> Self {
        Self {
            round,
            remaining: delay,
        }
    }

    pub fn is_due(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn elapse(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }
}
