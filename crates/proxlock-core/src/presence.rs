//! Absence detection with a post-unlock grace period

use crate::types::DistanceReading;
use crate::{GRACE_PERIOD_MS, LOCK_THRESHOLD_INCHES};

/// Outcome of evaluating one ranging sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDecision {
    /// Operator still counts as present (or the grace period is active)
    Stay,
    /// Absence confirmed, lock the host
    Lock,
}

/// Grace-period absence policy
///
/// After an unlock, absence detection is suppressed for a fixed interval.
/// Once the interval has elapsed, a single over-threshold sample triggers
/// the lock; there is no smoothing or debouncing across samples. The
/// monitor is stateless; the controller stops calling it once locked, so
/// the decision fires at most once per unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceMonitor {
    threshold_inches: u64,
    grace_period_ms: u64,
}

impl Default for PresenceMonitor {
    fn default() -> Self {
        Self {
            threshold_inches: LOCK_THRESHOLD_INCHES,
            grace_period_ms: GRACE_PERIOD_MS,
        }
    }
}

impl PresenceMonitor {
    pub fn new(threshold_inches: u64, grace_period_ms: u64) -> Self {
        Self {
            threshold_inches,
            grace_period_ms,
        }
    }

    /// Evaluate a sample taken at `now_ms`, where `unlocked_at_ms` is the
    /// most recent unlock (or boot)
    pub fn evaluate(
        &self,
        reading: DistanceReading,
        now_ms: u64,
        unlocked_at_ms: u64,
    ) -> LockDecision {
        if reading.inches() <= self.threshold_inches {
            return LockDecision::Stay;
        }
        if now_ms.saturating_sub(unlocked_at_ms) >= self.grace_period_ms {
            LockDecision::Lock
        } else {
            LockDecision::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_inches(inches: u64) -> DistanceReading {
        DistanceReading::from_round_trip_us(inches * 74 * 2)
    }

    #[test]
    fn at_or_below_threshold_never_locks() {
        let monitor = PresenceMonitor::default();
        assert_eq!(monitor.evaluate(at_inches(80), 60_000, 0), LockDecision::Stay);
        assert_eq!(monitor.evaluate(at_inches(12), 60_000, 0), LockDecision::Stay);
    }

    #[test]
    fn grace_period_suppresses_absence() {
        let monitor = PresenceMonitor::default();
        let unlocked_at = 1_000;

        assert_eq!(
            monitor.evaluate(at_inches(120), unlocked_at + 4_999, unlocked_at),
            LockDecision::Stay
        );
        assert_eq!(
            monitor.evaluate(at_inches(120), unlocked_at + 5_000, unlocked_at),
            LockDecision::Lock
        );
        assert_eq!(
            monitor.evaluate(at_inches(120), unlocked_at + 5_001, unlocked_at),
            LockDecision::Lock
        );
    }

    #[test]
    fn single_sample_triggers_after_grace() {
        let monitor = PresenceMonitor::new(80, 5_000);
        // 81 inches is already over the line; no sustained absence needed
        assert_eq!(
            monitor.evaluate(at_inches(81), 10_000, 0),
            LockDecision::Lock
        );
    }

    #[test]
    fn clock_skew_does_not_underflow() {
        let monitor = PresenceMonitor::default();
        // Sample timestamped before the unlock it follows
        assert_eq!(
            monitor.evaluate(at_inches(120), 100, 5_000),
            LockDecision::Stay
        );
    }
}
