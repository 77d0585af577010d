//! Toast notifications and the empty-result side effect.
//!
//! [`Notifier`] is the capability the shell raises notifications through.
//! [`ToastCenter`] implements it for the on-screen toast stack;
//! [`EmptyResultNotice`] is the effect that calls it when a freshly received
//! page turns out to be empty.

use super::query::QuerySnapshot;
use std::collections::VecDeque;
use std::time::Duration;

/// Message raised when a successful query returns no notes.
pub const NO_NOTES_MESSAGE: &str = "No notes found for your request.";

/// Announced generations remembered. Well above the number of cached query
/// keys, so a result still reachable from the cache is never announced twice.
const MAX_REMEMBERED_GENERATIONS: usize = 2 * super::query::MAX_CACHED_KEYS;

/// Most toasts kept on screen at once; older ones are dropped first.
const MAX_VISIBLE_TOASTS: usize = 3;

/// Fire-and-forget notification sink.
pub trait Notifier {
    /// Raises an error notification.
    fn error(&mut self, message: &str);
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
}

/// A single transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Stack of live toasts, expired oldest-first by timer.
#[derive(Debug, Clone)]
pub struct ToastCenter {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    unscheduled: usize,
    /// Expiry timers still owed to toasts that were evicted early.
    orphaned_timers: usize,
}

impl ToastCenter {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
            unscheduled: 0,
            orphaned_timers: 0,
        }
    }

    /// How long a toast stays on screen.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns how many expiry timers must be scheduled for toasts raised
    /// since the last call.
    pub fn take_unscheduled(&mut self) -> usize {
        std::mem::take(&mut self.unscheduled)
    }

    /// Handles one expiry timer. Returns `true` if a toast was removed.
    pub fn expire_oldest(&mut self) -> bool {
        if self.orphaned_timers > 0 {
            self.orphaned_timers -= 1;
            return false;
        }
        self.toasts.pop_front().is_some()
    }

    /// Live toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastCenter {
    fn error(&mut self, message: &str) {
        tracing::debug!(message = %message, "raising error toast");
        self.toasts.push_back(Toast {
            level: ToastLevel::Error,
            message: message.to_string(),
        });
        self.unscheduled += 1;

        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
            self.orphaned_timers += 1;
        }
    }
}

/// Raises [`NO_NOTES_MESSAGE`] once per distinct empty result.
///
/// Results are told apart by their generation, so re-rendering, revisiting a
/// cached key, or showing the result as a placeholder never notifies twice.
#[derive(Debug, Clone, Default)]
pub struct EmptyResultNotice {
    /// Oldest first.
    notified: VecDeque<u64>,
}

impl EmptyResultNotice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspects the current query snapshot and notifies if it shows an empty
    /// result that has not been announced yet. Returns whether it notified.
    pub fn observe(&mut self, snapshot: &QuerySnapshot<'_>, notifier: &mut dyn Notifier) -> bool {
        if !snapshot.is_success || snapshot.is_placeholder {
            return false;
        }
        let Some(resolved) = snapshot.data else {
            return false;
        };
        if !resolved.data.is_empty() || self.notified.contains(&resolved.generation) {
            return false;
        }
        self.notified.push_back(resolved.generation);
        if self.notified.len() > MAX_REMEMBERED_GENERATIONS {
            self.notified.pop_front();
        }

        notifier.error(NO_NOTES_MESSAGE);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::query::{QueryCache, QueryKey, RequestIds};
    use crate::domain::{Note, NoteTag, NotesPage};

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn error(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn one_note() -> NotesPage {
        NotesPage {
            notes: vec![Note {
                id: "1".into(),
                title: "t".into(),
                content: String::new(),
                tag: NoteTag::Work,
                created_at: String::new(),
                updated_at: String::new(),
            }],
            total_pages: 1,
        }
    }

    #[test]
    fn empty_result_notifies_exactly_once() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();
        let mut notice = EmptyResultNotice::new();
        let mut notifier = RecordingNotifier::default();

        let req = cache.observe(QueryKey::new(1, ""), &mut ids).unwrap();
        assert!(!notice.observe(&cache.snapshot(), &mut notifier));

        cache.resolve(req.request_id, &req.key, Ok(NotesPage::default()));
        for _ in 0..3 {
            notice.observe(&cache.snapshot(), &mut notifier);
        }

        assert_eq!(notifier.messages, vec![NO_NOTES_MESSAGE.to_string()]);
    }

    #[test]
    fn remembered_generations_stay_bounded() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();
        let mut notice = EmptyResultNotice::new();
        let mut notifier = RecordingNotifier::default();

        let searches = MAX_REMEMBERED_GENERATIONS + 10;
        for n in 0..searches {
            let req = cache.observe(QueryKey::new(1, format!("s{n}")), &mut ids).unwrap();
            cache.resolve(req.request_id, &req.key, Ok(NotesPage::default()));
            notice.observe(&cache.snapshot(), &mut notifier);
        }

        assert_eq!(notifier.messages.len(), searches);
        assert_eq!(notice.notified.len(), MAX_REMEMBERED_GENERATIONS);
    }

    #[test]
    fn non_empty_and_failed_results_never_notify() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();
        let mut notice = EmptyResultNotice::new();
        let mut notifier = RecordingNotifier::default();

        let ok = cache.observe(QueryKey::new(1, ""), &mut ids).unwrap();
        cache.resolve(ok.request_id, &ok.key, Ok(one_note()));
        notice.observe(&cache.snapshot(), &mut notifier);

        let bad = cache.observe(QueryKey::new(2, ""), &mut ids).unwrap();
        cache.resolve(
            bad.request_id,
            &bad.key,
            Err(crate::api::ApiFailure {
                status: None,
                message: "offline".into(),
            }),
        );
        notice.observe(&cache.snapshot(), &mut notifier);

        assert!(notifier.messages.is_empty());
    }

    #[test]
    fn placeholder_of_empty_result_is_not_announced_again() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();
        let mut notice = EmptyResultNotice::new();
        let mut notifier = RecordingNotifier::default();

        let a = cache.observe(QueryKey::new(1, "zzz"), &mut ids).unwrap();
        cache.resolve(a.request_id, &a.key, Ok(NotesPage::default()));
        notice.observe(&cache.snapshot(), &mut notifier);

        let b = cache.observe(QueryKey::new(1, "zz"), &mut ids).unwrap();
        notice.observe(&cache.snapshot(), &mut notifier);
        assert_eq!(notifier.messages.len(), 1);

        cache.resolve(b.request_id, &b.key, Ok(NotesPage::default()));
        notice.observe(&cache.snapshot(), &mut notifier);
        assert_eq!(notifier.messages.len(), 2);
    }

    #[test]
    fn toast_center_caps_visible_toasts_and_tracks_timers() {
        let mut center = ToastCenter::new(Duration::from_secs(3));
        for i in 0..4 {
            center.error(&format!("toast {i}"));
        }
        assert_eq!(center.len(), MAX_VISIBLE_TOASTS);
        assert_eq!(center.take_unscheduled(), 4);
        assert_eq!(center.take_unscheduled(), 0);

        assert!(!center.expire_oldest());
        assert!(center.expire_oldest());
        assert_eq!(center.iter().next().unwrap().message, "toast 2");
    }
}
