//! Keyed fetch-and-cache state machine for note pages.
//!
//! Every query key `(page, committed search)` owns one [`QueryState`]:
//!
//! ```text
//!            observe (unseen / errored key)
//!   Idle ───────────────────────────────────▶ Loading { request }
//!                                               │          │
//!                                   ok response │          │ failed response
//!                                               ▼          ▼
//!   invalidate ◀──────────────── Success { data }      Error { failure }
//!        │                          ▲
//!        └──▶ Success { data, refetch: Some(request) }
//! ```
//!
//! Besides the per-key states the cache keeps one placeholder: the data that
//! was on screen when the current key was switched to. While the new key is
//! loading the snapshot exposes the placeholder with `is_fetching` set, so the
//! list never blanks out between pages or searches.
//!
//! A response is only applied to the key it was requested for, and only if its
//! request id is still the one that key is waiting on.

use crate::api::{ApiFailure, RequestId};
use crate::domain::NotesPage;
use std::collections::{HashMap, VecDeque};

/// Keys kept in the cache; the least recently viewed ones beyond this are
/// evicted. The current key is never evicted.
pub const MAX_CACHED_KEYS: usize = 32;

/// Identifies one request for a page of notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub search: String,
}

impl QueryKey {
    #[must_use]
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            search: search.into(),
        }
    }
}

/// Hands out request ids that are unique for the plugin's lifetime.
#[derive(Debug, Clone, Default)]
pub struct RequestIds {
    last: u64,
}

impl RequestIds {
    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// A fetch the cache wants the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub request_id: RequestId,
    pub key: QueryKey,
}

/// Successful data tagged with the generation it was received in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub data: NotesPage,
    /// Unique per received response; lets observers tell two results apart
    /// even when their contents are equal.
    pub generation: u64,
}

/// Lifecycle of a single query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Loading {
        request_id: RequestId,
    },
    Success {
        resolved: Resolved,
        /// Background refetch in flight after invalidation.
        refetch: Option<RequestId>,
    },
    Error {
        failure: ApiFailure,
    },
}

impl QueryState {
    const fn awaiting(&self) -> Option<RequestId> {
        match self {
            Self::Loading { request_id } => Some(*request_id),
            Self::Success { refetch, .. } => *refetch,
            Self::Idle | Self::Error { .. } => None,
        }
    }
}

/// Outcome of feeding a response into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Stored, and the key is the one on screen.
    Current,
    /// Stored under a key that is not on screen.
    Background,
    /// Superseded or unknown request; nothing changed.
    Discarded,
}

/// Read-only view of the current key, shaped like the flags the UI consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySnapshot<'a> {
    /// Data to display: the key's own result, or the placeholder while loading.
    pub data: Option<&'a Resolved>,
    /// First load with nothing to show.
    pub is_loading: bool,
    /// Any request for the current key in flight.
    pub is_fetching: bool,
    /// `data` is present (own or placeholder).
    pub is_success: bool,
    /// The last request for the current key failed.
    pub is_error: bool,
    /// `data` belongs to a previous key.
    pub is_placeholder: bool,
}

impl QuerySnapshot<'_> {
    /// Notes to display, if any data is present.
    #[must_use]
    pub fn page(&self) -> Option<&NotesPage> {
        self.data.map(|r| &r.data)
    }

    /// Total pages of the displayed data, 0 when nothing is displayed.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.page().map_or(0, |p| p.total_pages)
    }
}

/// Cache of query states keyed by [`QueryKey`].
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryState>,
    /// Cached keys, least recently viewed first.
    recency: VecDeque<QueryKey>,
    current: Option<QueryKey>,
    placeholder: Option<Resolved>,
    generations: u64,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key currently on screen.
    #[must_use]
    pub const fn current_key(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }

    /// State stored for `key`.
    #[must_use]
    pub fn state(&self, key: &QueryKey) -> Option<&QueryState> {
        self.entries.get(key)
    }

    /// Makes `key` the current key.
    ///
    /// Returns the fetch to perform when the key has no usable result and no
    /// request in flight. Cached successes are reused; errored keys are tried
    /// again since the user navigated to them anew.
    pub fn observe(&mut self, key: QueryKey, ids: &mut RequestIds) -> Option<FetchRequest> {
        if self.current.as_ref() == Some(&key) {
            return None;
        }

        let _span = tracing::debug_span!("query_observe", page = key.page, search = %key.search).entered();

        self.placeholder = self.visible_data().cloned();
        self.current = Some(key.clone());
        self.touch(&key);

        let fetch = match self.entries.get(&key) {
            Some(QueryState::Success { .. } | QueryState::Loading { .. }) => {
                tracing::debug!("key cached or in flight, no fetch");
                None
            }
            Some(QueryState::Idle | QueryState::Error { .. }) | None => {
                let request_id = ids.next_id();
                tracing::debug!(request_id = %request_id, "starting fetch");
                self.entries
                    .insert(key.clone(), QueryState::Loading { request_id });
                Some(FetchRequest { request_id, key })
            }
        };

        self.evict();
        fetch
    }

    /// Number of keys currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: &QueryKey) {
        self.recency.retain(|k| k != key);
        self.recency.push_back(key.clone());
    }

    /// Drops least recently viewed keys beyond [`MAX_CACHED_KEYS`]. A reply
    /// for an evicted key finds nothing awaiting it and is discarded.
    fn evict(&mut self) {
        while self.entries.len() > MAX_CACHED_KEYS {
            let Some(pos) = self
                .recency
                .iter()
                .position(|k| self.current.as_ref() != Some(k))
            else {
                break;
            };
            if let Some(key) = self.recency.remove(pos) {
                tracing::debug!(page = key.page, search = %key.search, "evicting cached query");
                self.entries.remove(&key);
            }
        }
    }

    /// Feeds a response for `key` into the cache.
    pub fn resolve(
        &mut self,
        request_id: RequestId,
        key: &QueryKey,
        outcome: Result<NotesPage, ApiFailure>,
    ) -> Applied {
        let awaited = self.entries.get(key).and_then(QueryState::awaiting);
        if awaited != Some(request_id) {
            tracing::debug!(
                request_id = %request_id,
                awaited = ?awaited,
                "discarding superseded response"
            );
            return Applied::Discarded;
        }

        let next = match outcome {
            Ok(data) => {
                self.generations += 1;
                tracing::debug!(
                    request_id = %request_id,
                    notes = data.notes.len(),
                    total_pages = data.total_pages,
                    generation = self.generations,
                    "query succeeded"
                );
                QueryState::Success {
                    resolved: Resolved {
                        data,
                        generation: self.generations,
                    },
                    refetch: None,
                }
            }
            Err(failure) => {
                tracing::debug!(request_id = %request_id, error = %failure, "query failed");
                QueryState::Error { failure }
            }
        };
        self.entries.insert(key.clone(), next);

        if self.current.as_ref() == Some(key) {
            self.placeholder = None;
            Applied::Current
        } else {
            Applied::Background
        }
    }

    /// Drops every cached result and refetches the current key.
    ///
    /// The current key keeps showing its data (or placeholder) while the
    /// refetch is in flight; a request already in flight for it is superseded.
    pub fn invalidate(&mut self, ids: &mut RequestIds) -> Option<FetchRequest> {
        let current = self.current.clone()?;
        let kept = self.entries.remove(&current);
        self.entries.clear();
        self.recency.clear();
        self.recency.push_back(current.clone());

        let request_id = ids.next_id();
        let state = match kept {
            Some(QueryState::Success { resolved, .. }) => QueryState::Success {
                resolved,
                refetch: Some(request_id),
            },
            _ => QueryState::Loading { request_id },
        };
        self.entries.insert(current.clone(), state);

        tracing::debug!(request_id = %request_id, "cache invalidated, refetching current key");
        Some(FetchRequest {
            request_id,
            key: current,
        })
    }

    fn visible_data(&self) -> Option<&Resolved> {
        self.snapshot().data
    }

    /// Flags and data for the current key.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot<'_> {
        let idle = QuerySnapshot {
            data: None,
            is_loading: false,
            is_fetching: false,
            is_success: false,
            is_error: false,
            is_placeholder: false,
        };

        let Some(state) = self.current.as_ref().and_then(|k| self.entries.get(k)) else {
            return idle;
        };

        match state {
            QueryState::Idle => idle,
            QueryState::Loading { .. } => match &self.placeholder {
                Some(previous) => QuerySnapshot {
                    data: Some(previous),
                    is_fetching: true,
                    is_success: true,
                    is_placeholder: true,
                    ..idle
                },
                None => QuerySnapshot {
                    is_loading: true,
                    is_fetching: true,
                    ..idle
                },
            },
            QueryState::Success { resolved, refetch } => QuerySnapshot {
                data: Some(resolved),
                is_fetching: refetch.is_some(),
                is_success: true,
                ..idle
            },
            QueryState::Error { .. } => QuerySnapshot {
                is_error: true,
                ..idle
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteTag};

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("note {id}"),
            content: String::new(),
            tag: NoteTag::Todo,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn page(ids: &[&str], total_pages: u32) -> NotesPage {
        NotesPage {
            notes: ids.iter().map(|id| note(id)).collect(),
            total_pages,
        }
    }

    fn failure() -> ApiFailure {
        ApiFailure {
            status: Some(500),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn least_recently_viewed_keys_are_evicted_beyond_the_cap() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        for n in 0..MAX_CACHED_KEYS + 5 {
            let req = cache.observe(QueryKey::new(1, format!("q{n}")), &mut ids).unwrap();
            cache.resolve(req.request_id, &req.key, Ok(page(&["a"], 1)));
        }

        assert_eq!(cache.len(), MAX_CACHED_KEYS);
        assert!(cache.state(&QueryKey::new(1, "q0")).is_none());
        assert!(cache.state(&QueryKey::new(1, format!("q{}", MAX_CACHED_KEYS + 4))).is_some());

        let revisit = cache.observe(QueryKey::new(1, "q0"), &mut ids);
        assert!(revisit.is_some(), "evicted key is fetched again");
        assert_eq!(cache.len(), MAX_CACHED_KEYS);
    }

    #[test]
    fn first_fetch_reports_loading_without_data() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let req = cache.observe(QueryKey::new(1, ""), &mut ids).unwrap();
        let snap = cache.snapshot();
        assert!(snap.is_loading && snap.is_fetching);
        assert!(snap.data.is_none());

        assert_eq!(cache.resolve(req.request_id, &req.key, Ok(page(&["a"], 1))), Applied::Current);
        let snap = cache.snapshot();
        assert!(snap.is_success && !snap.is_loading && !snap.is_fetching);
        assert_eq!(snap.page().unwrap().notes.len(), 1);
    }

    #[test]
    fn key_change_keeps_previous_data_until_new_result() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let p3 = cache.observe(QueryKey::new(3, ""), &mut ids).unwrap();
        cache.resolve(p3.request_id, &p3.key, Ok(page(&["p3"], 5)));

        let p4 = cache.observe(QueryKey::new(4, ""), &mut ids).unwrap();
        let snap = cache.snapshot();
        assert!(snap.is_fetching && !snap.is_loading && snap.is_placeholder);
        assert_eq!(snap.page().unwrap().notes[0].id, "p3");

        cache.resolve(p4.request_id, &p4.key, Ok(page(&["p4"], 5)));
        let snap = cache.snapshot();
        assert!(!snap.is_fetching && !snap.is_placeholder);
        assert_eq!(snap.page().unwrap().notes[0].id, "p4");
    }

    #[test]
    fn cached_keys_are_not_refetched() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let a = cache.observe(QueryKey::new(1, ""), &mut ids).unwrap();
        cache.resolve(a.request_id, &a.key, Ok(page(&["a"], 2)));
        let b = cache.observe(QueryKey::new(2, ""), &mut ids).unwrap();
        cache.resolve(b.request_id, &b.key, Ok(page(&["b"], 2)));

        assert_eq!(cache.observe(QueryKey::new(1, ""), &mut ids), None);
        assert_eq!(cache.snapshot().page().unwrap().notes[0].id, "a");
    }

    #[test]
    fn stale_response_never_reaches_current_view() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let first = cache.observe(QueryKey::new(1, "ca"), &mut ids).unwrap();
        let second = cache.observe(QueryKey::new(1, "cat"), &mut ids).unwrap();

        let applied = cache.resolve(first.request_id, &first.key, Ok(page(&["old"], 1)));
        assert_eq!(applied, Applied::Background);
        assert!(cache.snapshot().is_loading);

        cache.resolve(second.request_id, &second.key, Ok(page(&["new"], 1)));
        assert_eq!(cache.snapshot().page().unwrap().notes[0].id, "new");
    }

    #[test]
    fn error_hides_data_and_is_retried_on_revisit() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let ok = cache.observe(QueryKey::new(1, ""), &mut ids).unwrap();
        cache.resolve(ok.request_id, &ok.key, Ok(page(&["a"], 3)));

        let bad = cache.observe(QueryKey::new(2, ""), &mut ids).unwrap();
        cache.resolve(bad.request_id, &bad.key, Err(failure()));
        let snap = cache.snapshot();
        assert!(snap.is_error && !snap.is_success && snap.data.is_none());

        assert!(cache.observe(QueryKey::new(1, ""), &mut ids).is_none());
        let retry = cache.observe(QueryKey::new(2, ""), &mut ids);
        assert!(retry.is_some());
    }

    #[test]
    fn unknown_and_superseded_responses_are_discarded() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();
        let key = QueryKey::new(1, "");

        assert_eq!(
            cache.resolve(RequestId(99), &key, Ok(page(&[], 0))),
            Applied::Discarded
        );

        let original = cache.observe(key.clone(), &mut ids).unwrap();
        let refetch = cache.invalidate(&mut ids).unwrap();
        assert_eq!(
            cache.resolve(original.request_id, &key, Ok(page(&["old"], 1))),
            Applied::Discarded
        );
        assert_eq!(
            cache.resolve(refetch.request_id, &key, Ok(page(&["fresh"], 1))),
            Applied::Current
        );
    }

    #[test]
    fn invalidate_keeps_current_data_visible_and_drops_others() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let other = cache.observe(QueryKey::new(2, ""), &mut ids).unwrap();
        cache.resolve(other.request_id, &other.key, Ok(page(&["b"], 2)));
        let cur = cache.observe(QueryKey::new(1, ""), &mut ids).unwrap();
        cache.resolve(cur.request_id, &cur.key, Ok(page(&["a"], 2)));

        let refetch = cache.invalidate(&mut ids).unwrap();
        assert_eq!(refetch.key, QueryKey::new(1, ""));
        let snap = cache.snapshot();
        assert!(snap.is_success && snap.is_fetching && !snap.is_loading);
        assert!(cache.state(&QueryKey::new(2, "")).is_none());
    }

    #[test]
    fn equal_contents_get_distinct_generations() {
        let mut cache = QueryCache::new();
        let mut ids = RequestIds::default();

        let a = cache.observe(QueryKey::new(1, "x"), &mut ids).unwrap();
        cache.resolve(a.request_id, &a.key, Ok(page(&[], 0)));
        let first = cache.snapshot().data.unwrap().generation;

        let b = cache.observe(QueryKey::new(1, "y"), &mut ids).unwrap();
        cache.resolve(b.request_id, &b.key, Ok(page(&[], 0)));
        let second = cache.snapshot().data.unwrap().generation;

        assert_ne!(first, second);
    }
}
