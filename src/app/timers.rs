//! Bookkeeping that maps Zellij timer events back to their purpose.
//!
//! `set_timeout` takes no identifier and the resulting `Timer` event only
//! reports how many seconds actually elapsed. The ledger remembers the kind and
//! requested delay of every scheduled timer. When a `Timer` event arrives it
//! claims the longest delay that has already run out, oldest first among
//! equals. Host timers only ever fire late, so a long delay is never claimed
//! by an early event. If nothing has run out yet (clock jitter), the nearest
//! delay is claimed instead.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::time::Duration;

/// Slack for hosts that report an elapsed time a hair under the request.
const ELAPSED_TOLERANCE: Duration = Duration::from_millis(20);

/// Purpose of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Quiescence tick for the search debouncer.
    SearchDebounce,
    /// Expiry of the oldest visible toast.
    ToastExpiry,
}

/// FIFO of scheduled timers awaiting their `Timer` event.
#[derive(Debug, Clone, Default)]
pub struct TimerLedger {
    pending: VecDeque<(Duration, TimerKind)>,
}

impl TimerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a timer and returns the delay in seconds for `set_timeout`.
    pub fn schedule(&mut self, kind: TimerKind, after: Duration) -> f64 {
        self.pending.push_back((after, kind));
        after.as_secs_f64()
    }

    /// Claims the scheduled timer that best explains a `Timer(elapsed)` event.
    ///
    /// Returns `None` when nothing is scheduled.
    pub fn resolve(&mut self, elapsed_secs: f64) -> Option<TimerKind> {
        let elapsed = Duration::try_from_secs_f64(elapsed_secs).unwrap_or_default();
        let deadline = elapsed + ELAPSED_TOLERANCE;

        let expired = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (after, _))| *after <= deadline)
            .max_by_key(|(idx, (after, _))| (*after, Reverse(*idx)))
            .map(|(idx, _)| idx);

        let idx = match expired {
            Some(idx) => idx,
            None => {
                self.pending
                    .iter()
                    .enumerate()
                    .min_by_key(|(idx, (after, _))| (after.saturating_sub(elapsed), *idx))?
                    .0
            }
        };

        self.pending.remove(idx).map(|(_, kind)| kind)
    }

    /// Number of timers still awaiting their event.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_picks_the_matching_delay() {
        let mut ledger = TimerLedger::new();
        ledger.schedule(TimerKind::ToastExpiry, Duration::from_millis(3000));
        ledger.schedule(TimerKind::SearchDebounce, Duration::from_millis(300));

        assert_eq!(ledger.resolve(0.3012), Some(TimerKind::SearchDebounce));
        assert_eq!(ledger.resolve(3.0004), Some(TimerKind::ToastExpiry));
        assert_eq!(ledger.resolve(0.3), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn equal_delays_resolve_in_schedule_order() {
        let mut ledger = TimerLedger::new();
        ledger.schedule(TimerKind::SearchDebounce, Duration::from_millis(500));
        ledger.schedule(TimerKind::ToastExpiry, Duration::from_millis(500));

        assert_eq!(ledger.resolve(0.5), Some(TimerKind::SearchDebounce));
        assert_eq!(ledger.resolve(0.5), Some(TimerKind::ToastExpiry));
    }

    #[test]
    fn late_timer_claims_the_expired_delay_not_the_nearest() {
        let mut ledger = TimerLedger::new();
        ledger.schedule(TimerKind::ToastExpiry, Duration::from_millis(3000));
        ledger.schedule(TimerKind::SearchDebounce, Duration::from_millis(300));

        assert_eq!(ledger.resolve(1.7), Some(TimerKind::SearchDebounce));
        assert_eq!(ledger.resolve(3.1), Some(TimerKind::ToastExpiry));
    }

    #[test]
    fn slightly_early_report_falls_back_to_nearest_delay() {
        let mut ledger = TimerLedger::new();
        ledger.schedule(TimerKind::ToastExpiry, Duration::from_millis(3000));

        assert_eq!(ledger.resolve(2.9), Some(TimerKind::ToastExpiry));
    }

    #[test]
    fn schedule_reports_seconds() {
        let mut ledger = TimerLedger::new();
        let secs = ledger.schedule(TimerKind::SearchDebounce, Duration::from_millis(250));
        assert!((secs - 0.25).abs() < f64::EPSILON);
        assert_eq!(ledger.len(), 1);
    }
}
