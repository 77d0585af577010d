//! Single-slot debouncer for search input.
//!
//! Zellij timers cannot be cancelled, so cancellation is expressed by
//! bookkeeping instead: every [`Debouncer::push`] replaces the pending value
//! and arms one more tick, and only the tick that belongs to the latest push
//! (the one that brings the outstanding count back to zero) releases the
//! value. Ticks for superseded pushes still arrive but find the slot armed
//! again and release nothing.
//!
//! This relies on ticks for equal delays arriving in the order they were
//! scheduled, which holds for the host's timer thread.

use std::time::Duration;

/// A pending-value slot released once input goes quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    pending: Option<T>,
    outstanding: u32,
    delay: Duration,
}

impl<T> Debouncer<T> {
    /// Creates an empty debouncer with the given quiescence interval.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            outstanding: 0,
            delay,
        }
    }

    /// Interval after which a pushed value is released.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Stores `value`, superseding any pending one.
    ///
    /// The caller must schedule exactly one [`Debouncer::tick`] after the
    /// returned delay.
    pub fn push(&mut self, value: T) -> Duration {
        self.pending = Some(value);
        self.outstanding += 1;
        self.delay
    }

    /// Consumes one scheduled tick, releasing the value if this tick belongs
    /// to the most recent push.
    pub fn tick(&mut self) -> Option<T> {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            self.pending.take()
        } else {
            None
        }
    }

    /// Whether a value is waiting to be released.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays keystrokes at the given millisecond offsets against a virtual
    /// clock and returns every `(time, value)` the debouncer released.
    fn replay(delay_ms: u64, keystrokes: &[(u64, &str)]) -> Vec<(u64, String)> {
        let mut debouncer: Debouncer<&str> = Debouncer::new(Duration::from_millis(delay_ms));
        let mut ticks: Vec<u64> = Vec::new();
        let mut released = Vec::new();

        let mut events: Vec<(u64, Option<&str>)> =
            keystrokes.iter().map(|(t, v)| (*t, Some(*v))).collect();
        let mut cursor = 0;

        loop {
            let next_key = events.get(cursor).map(|(t, _)| *t);
            let next_tick = ticks.first().copied();
            match (next_key, next_tick) {
                (Some(k), Some(t)) if t < k => {
                    ticks.remove(0);
                    if let Some(v) = debouncer.tick() {
                        released.push((t, v.to_string()));
                    }
                }
                (Some(k), _) => {
                    let value = events[cursor].1.take().unwrap_or_default();
                    let after = debouncer.push(value);
                    ticks.push(k + u64::try_from(after.as_millis()).unwrap());
                    cursor += 1;
                }
                (None, Some(t)) => {
                    ticks.remove(0);
                    if let Some(v) = debouncer.tick() {
                        released.push((t, v.to_string()));
                    }
                }
                (None, None) => break,
            }
        }

        released
    }

    #[test]
    fn burst_within_window_commits_only_last_value() {
        let released = replay(300, &[(0, "c"), (100, "ca"), (200, "cat")]);
        assert_eq!(released, vec![(500, "cat".to_string())]);
    }

    #[test]
    fn separated_inputs_commit_individually() {
        let released = replay(300, &[(0, "a"), (400, "ab")]);
        assert_eq!(released, vec![(300, "a".to_string()), (700, "ab".to_string())]);
    }

    #[test]
    fn input_landing_on_the_deadline_supersedes_it() {
        let released = replay(300, &[(0, "a"), (300, "ab")]);
        assert_eq!(released, vec![(600, "ab".to_string())]);
    }

    #[test]
    fn stray_ticks_release_nothing() {
        let mut debouncer: Debouncer<String> = Debouncer::new(Duration::from_millis(300));
        assert_eq!(debouncer.tick(), None);

        debouncer.push("x".to_string());
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.tick(), Some("x".to_string()));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.tick(), None);
    }
}
