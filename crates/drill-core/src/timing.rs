//! Per-cycle idle budget

use std::time::Duration;

/// What to do after an element's audio events have finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleDecision {
    /// Idle for the remainder of the cycle
    Idle(Duration),
    /// Audio alone took longer than the target cycle
    Shortfall { target: Duration, consumed: Duration },
    /// Nothing to wait for and nothing to report
    None,
}

/// Keeps the average element cycle near a configured target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingBudget {
    pub target: Duration,
}

impl TimingBudget {
    pub fn new(target: Duration) -> Self {
        Self { target }
    }

    /// `consumed` is tone duration plus post-tone pause, when both occurred.
    pub fn remaining(&self, consumed: Duration) -> IdleDecision {
        match self.target.checked_sub(consumed) {
            Some(remaining) if !remaining.is_zero() => IdleDecision::Idle(remaining),
            _ if !consumed.is_zero() && consumed > self.target => IdleDecision::Shortfall {
                target: self.target,
                consumed,
            },
            _ => IdleDecision::None,
        }
    }
}
