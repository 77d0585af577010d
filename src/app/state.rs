//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with the selection, paging and search-commit operations the event
//! handler drives, and the view model computation the renderer consumes.
//!
//! # State Components
//!
//! - **View state**: page, literal search input, committed search, input mode
//! - **Debouncer**: holds typed input until it settles
//! - **Query cache**: per-key fetch state plus the last-known-good placeholder
//! - **Notifications**: toast stack and the empty-result notice
//! - **Modal**: open/closed state of the creation form
//!
//! # View Model Computation
//!
//! `compute_viewmodel` maps the state to the fixed set of regions: toolbar
//! (search box, pagination when there is more than one page, create button),
//! body (loader, error banner, note list), optional modal overlay and toasts.

use super::actions::Action;
use super::debounce::Debouncer;
use super::form::{FormField, ModalControl, NoteForm};
use super::modes::InputMode;
use super::notify::{EmptyResultNotice, ToastCenter};
use super::query::{QueryCache, QueryKey, QuerySnapshot, RequestIds};
use super::timers::TimerKind;
use crate::domain::Note;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyInfo, FooterInfo, FormFieldInfo, HeaderInfo, ModalInfo, NoteItem, PageSlot,
    PaginationInfo, SearchBarInfo, ToastInfo, ToolbarInfo, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Text of the error banner shown when the current query failed.
pub const ERROR_BANNER: &str = "There was an error, please try again...";

/// Label of the create-note button.
const CREATE_LABEL: &str = "Create note +";

/// Pages shown around the current one in the pagination control.
const PAGE_RANGE: u32 = 5;

/// Pages always shown at either end of the pagination control.
const PAGE_MARGIN: u32 = 1;

/// Rows taken by everything except the note list: blank line, header,
/// border, 3-line toolbar, status line, border, footer.
const CHROME_ROWS: usize = 9;

const TITLE_COLUMN_WIDTH: usize = 32;
const TAG_COLUMN_WIDTH: usize = 11;
const AGE_COLUMN_WIDTH: usize = 10;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current pagination cursor, starting at 1.
    pub page: u32,

    /// Literal search box content; changes on every keystroke.
    pub search_input: String,

    /// Search term the query is keyed on; changes only once input settles.
    pub committed_search: String,

    pub input_mode: InputMode,

    /// Zero-based index of the selected note within the visible page.
    pub selected_index: usize,

    pub debouncer: Debouncer<String>,

    pub query: QueryCache,

    pub request_ids: RequestIds,

    pub notice: EmptyResultNotice,

    pub toasts: ToastCenter,

    pub modal: ModalControl,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the initial state: page 1, empty search, nothing fetched yet.
    #[must_use]
    pub fn new(theme: Theme, debounce: Duration, toast_ttl: Duration) -> Self {
        Self {
            page: 1,
            search_input: String::new(),
            committed_search: String::new(),
            input_mode: InputMode::Browse,
            selected_index: 0,
            debouncer: Debouncer::new(debounce),
            query: QueryCache::new(),
            request_ids: RequestIds::default(),
            notice: EmptyResultNotice::new(),
            toasts: ToastCenter::new(toast_ttl),
            modal: ModalControl::default(),
            theme,
        }
    }

    /// Query key derived from the current page and committed search.
    #[must_use]
    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.page, self.committed_search.clone())
    }

    /// Points the query cache at the current key.
    ///
    /// Returns the fetch to perform when the key has nothing cached.
    pub fn sync_query(&mut self) -> Option<Action> {
        let fetch = self.query.observe(self.query_key(), &mut self.request_ids);
        self.clamp_selection();

        fetch.map(|fetch| Action::FetchNotes {
            request_id: fetch.request_id,
            page: fetch.key.page,
            search: fetch.key.search,
        })
    }

    /// Commits a settled search term: resets to page 1 and re-keys the query.
    pub fn commit_search(&mut self, value: String) -> Option<Action> {
        tracing::debug!(search = %value, previous = %self.committed_search, "search committed");
        self.committed_search = value;
        self.page = 1;
        self.selected_index = 0;
        self.sync_query()
    }

    /// Moves to `page`, clamped to the displayed result's page count.
    ///
    /// Returns `false` when there is nothing to page through or the page does
    /// not change.
    pub fn set_page(&mut self, page: u32) -> bool {
        let total = self.total_pages();
        if total <= 1 {
            return false;
        }
        let page = page.clamp(1, total);
        if page == self.page {
            return false;
        }

        tracing::debug!(from = self.page, to = page, total, "page changed");
        self.page = page;
        self.selected_index = 0;
        true
    }

    /// Flags and data for the current query key.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot<'_> {
        self.query.snapshot()
    }

    /// Page count of the displayed result, 0 when nothing is displayed.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.snapshot().total_pages()
    }

    /// Notes currently listed on screen.
    #[must_use]
    pub fn visible_notes(&self) -> &[Note] {
        let snapshot = self.query.snapshot();
        if !snapshot.is_success {
            return &[];
        }
        match snapshot.data {
            Some(resolved) => &resolved.data.notes,
            None => &[],
        }
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_notes().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_notes().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the visible notes.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_notes().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Runs the post-event effects: the empty-result notice and scheduling of
    /// expiry timers for toasts raised since the last call.
    pub fn run_effects(&mut self) -> Vec<Action> {
        let snapshot = self.query.snapshot();
        self.notice.observe(&snapshot, &mut self.toasts);

        let after = self.toasts.ttl();
        (0..self.toasts.take_unscheduled())
            .map(|_| Action::SetTimeout {
                kind: TimerKind::ToastExpiry,
                after,
            })
            .collect()
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions, using the wall clock for note ages.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// Computes the view model with note ages measured against `now`.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let snapshot = self.snapshot();

        UIViewModel {
            header: self.compute_header(&snapshot),
            toolbar: self.compute_toolbar(&snapshot),
            body: self.compute_body(&snapshot, rows, cols, now),
            modal: self.modal.form().map(Self::compute_modal),
            toasts: self
                .toasts
                .iter()
                .map(|toast| ToastInfo {
                    message: toast.message.clone(),
                })
                .collect(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self, snapshot: &QuerySnapshot<'_>) -> HeaderInfo {
        let title = match snapshot.total_pages() {
            0 => " NotePane ".to_string(),
            total => format!(" NotePane  page {} of {total} ", self.page),
        };
        HeaderInfo { title }
    }

    fn compute_toolbar(&self, snapshot: &QuerySnapshot<'_>) -> ToolbarInfo {
        let total_pages = snapshot.total_pages();
        let pagination = (total_pages > 1).then(|| PaginationInfo {
            page: self.page,
            total_pages,
            slots: page_slots(self.page, total_pages, PAGE_RANGE, PAGE_MARGIN),
        });

        ToolbarInfo {
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                focused: self.input_mode == InputMode::Search && !self.modal.is_open(),
                pending: self.debouncer.is_pending(),
            },
            pagination,
            create_label: CREATE_LABEL.to_string(),
        }
    }

    fn compute_body(
        &self,
        snapshot: &QuerySnapshot<'_>,
        rows: usize,
        cols: usize,
        now: DateTime<Utc>,
    ) -> BodyInfo {
        let notes = snapshot
            .page()
            .filter(|page| snapshot.is_success && !page.is_empty())
            .map(|page| self.compute_note_items(&page.notes, rows, cols, now));

        BodyInfo {
            loader: snapshot.is_loading || snapshot.is_fetching,
            error: snapshot.is_error.then(|| ERROR_BANNER.to_string()),
            notes,
        }
    }

    /// Windows the list around the selection and formats each visible row.
    fn compute_note_items(
        &self,
        notes: &[Note],
        rows: usize,
        cols: usize,
        now: DateTime<Utc>,
    ) -> Vec<NoteItem> {
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let visible_start = self
            .selected_index
            .saturating_sub(available_rows / 2)
            .min(notes.len().saturating_sub(available_rows));
        let visible_end = (visible_start + available_rows).min(notes.len());

        let search = self.committed_search.trim();
        let matcher = (!search.is_empty()).then(SkimMatcherV2::default);
        let snippet_width = cols
            .saturating_sub(TITLE_COLUMN_WIDTH + TAG_COLUMN_WIDTH + AGE_COLUMN_WIDTH + 4);

        notes[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, note)| {
                let title = truncate(&note.title, TITLE_COLUMN_WIDTH - 2);
                let visible_chars = title.chars().count();
                let highlight_ranges = matcher
                    .as_ref()
                    .map(|m| compute_highlight_ranges(&note.title, search, m))
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|(start, _)| *start < visible_chars)
                    .map(|(start, end)| (start, end.min(visible_chars)))
                    .collect();

                NoteItem {
                    title,
                    tag: note.tag.label().to_string(),
                    snippet: truncate(note.content.lines().next().unwrap_or(""), snippet_width),
                    age: note.age_at(now),
                    is_selected: visible_start + relative_idx == self.selected_index,
                    highlight_ranges,
                }
            })
            .collect()
    }

    fn compute_modal(form: &NoteForm) -> ModalInfo {
        let field = |label: &str, value: String, which: FormField| FormFieldInfo {
            label: label.to_string(),
            value,
            focused: form.field == which,
        };

        ModalInfo {
            title: " Create note ".to_string(),
            fields: vec![
                field("Title", form.title.clone(), FormField::Title),
                field("Content", form.content.clone(), FormField::Content),
                field("Tag", format!("< {} >", form.tag.label()), FormField::Tag),
            ],
            error: form.error.clone(),
            submitting: form.submitting.is_some(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.modal.is_open() {
            "Tab/Shift+Tab: field  Left/Right: tag  Enter: create  ESC: cancel"
        } else {
            match self.input_mode {
                InputMode::Search => "ESC/Enter: done  Type to search",
                InputMode::Browse => {
                    "j/k: select  h/l: page  /: search  n: new note  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Truncates to `max_chars` characters, marking the cut with "...".
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{kept}...")
}

/// Coalesces the matcher's character indices into `(start, end)` runs.
fn compute_highlight_ranges(text: &str, pattern: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Lays out the pagination control: `margin` pages at either end, a window
/// of `range` pages around `page`, and a gap wherever pages are skipped. A
/// gap that would hide a single page shows that page instead.
fn page_slots(page: u32, total: u32, range: u32, margin: u32) -> Vec<PageSlot> {
    let page = page.clamp(1, total.max(1));

    let mut left = i64::from(page) - i64::from(range / 2);
    let mut right = left + i64::from(range) - 1;
    if left < 1 {
        right += 1 - left;
        left = 1;
    }
    if right > i64::from(total) {
        left -= right - i64::from(total);
        right = i64::from(total);
    }

    let shown = |n: u32| {
        n <= margin || n > total.saturating_sub(margin) || (left..=right).contains(&i64::from(n))
    };

    let mut slots = Vec::new();
    let mut previous: Option<u32> = None;
    for n in (1..=total).filter(|n| shown(*n)) {
        if let Some(prev) = previous {
            match n - prev {
                1 => {}
                2 => slots.push(PageSlot::Page {
                    number: prev + 1,
                    current: prev + 1 == page,
                }),
                _ => slots.push(PageSlot::Gap),
            }
        }
        slots.push(PageSlot::Page {
            number: n,
            current: n == page,
        });
        previous = Some(n);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoteTag, NotesPage};
    use chrono::TimeZone;

    fn state() -> AppState {
        AppState::new(
            Theme::default(),
            Duration::from_millis(300),
            Duration::from_secs(3),
        )
    }

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: "first line\nsecond line".to_string(),
            tag: NoteTag::Personal,
            created_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: String::new(),
        }
    }

    fn load(state: &mut AppState, notes: Vec<Note>, total_pages: u32) {
        let Some(Action::FetchNotes { request_id, page, search }) = state.sync_query() else {
            panic!("expected a fetch");
        };
        state.query.resolve(
            request_id,
            &QueryKey::new(page, search),
            Ok(NotesPage { notes, total_pages }),
        );
        state.clamp_selection();
    }

    fn numbers(slots: &[PageSlot]) -> String {
        slots
            .iter()
            .map(|slot| match slot {
                PageSlot::Page { number, current: true } => format!("[{number}]"),
                PageSlot::Page { number, .. } => number.to_string(),
                PageSlot::Gap => "..".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn page_slots_window_with_margins_and_gaps() {
        assert_eq!(numbers(&page_slots(1, 3, 5, 1)), "[1] 2 3");
        assert_eq!(numbers(&page_slots(6, 12, 5, 1)), "1 .. 4 5 [6] 7 8 .. 12");
        assert_eq!(numbers(&page_slots(1, 20, 5, 1)), "[1] 2 3 4 5 .. 20");
        assert_eq!(numbers(&page_slots(20, 20, 5, 1)), "1 .. 16 17 18 19 [20]");
        assert_eq!(numbers(&page_slots(4, 9, 5, 1)), "1 2 3 [4] 5 6 .. 9");
    }

    #[test]
    fn pagination_is_absent_for_a_single_page() {
        let mut state = state();
        load(&mut state, vec![note("1", "only")], 1);

        let vm = state.compute_viewmodel(24, 100);
        assert!(vm.toolbar.pagination.is_none());
        assert_eq!(vm.toolbar.create_label, CREATE_LABEL);
        assert!(!state.set_page(2));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn set_page_clamps_to_total_pages() {
        let mut state = state();
        load(&mut state, vec![note("1", "a")], 4);

        assert!(state.set_page(9));
        assert_eq!(state.page, 4);
        assert!(!state.set_page(4));
        assert!(state.set_page(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn commit_search_resets_page_and_refetches() {
        let mut state = state();
        load(&mut state, vec![note("1", "a")], 4);
        state.set_page(3);
        state.sync_query();

        let action = state.commit_search("cat".to_string());
        assert_eq!(state.page, 1);
        assert!(matches!(
            action,
            Some(Action::FetchNotes { page: 1, ref search, .. }) if search == "cat"
        ));
    }

    #[test]
    fn body_shows_list_with_highlights_and_ages() {
        let mut state = state();
        state.committed_search = "cat".to_string();
        load(&mut state, vec![note("1", "Tomcat notes"), note("2", "Other")], 1);
        state.move_selection_down();

        let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        let vm = state.compute_viewmodel_at(24, 100, now);
        assert!(!vm.body.loader);
        assert!(vm.body.error.is_none());

        let items = vm.body.notes.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].highlight_ranges, vec![(3, 6)]);
        assert_eq!(items[0].tag, "Personal");
        assert_eq!(items[0].snippet, "first line");
        assert_eq!(items[0].age, "3h ago");
        assert!(items[1].is_selected);
    }

    #[test]
    fn empty_success_renders_no_list_and_no_loader() {
        let mut state = state();
        load(&mut state, vec![], 0);

        let vm = state.compute_viewmodel(24, 80);
        assert!(!vm.body.loader);
        assert!(vm.body.notes.is_none());
        assert!(vm.body.error.is_none());
        assert!(vm.toolbar.pagination.is_none());
    }

    #[test]
    fn loader_shows_while_loading_and_error_hides_list() {
        let mut state = state();
        let Some(Action::FetchNotes { request_id: id, .. }) = state.sync_query() else {
            panic!("expected a fetch");
        };
        let key = state.query_key();
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.body.loader && vm.body.notes.is_none());

        state.query.resolve(
            id,
            &key,
            Err(crate::api::ApiFailure {
                status: Some(502),
                message: "bad gateway".into(),
            }),
        );

        let vm = state.compute_viewmodel(24, 80);
        assert!(!vm.body.loader);
        assert_eq!(vm.body.error.as_deref(), Some(ERROR_BANNER));
        assert!(vm.body.notes.is_none());
    }

    #[test]
    fn short_page_stays_fully_visible_with_last_note_selected() {
        let mut state = state();
        let notes = (0..12).map(|i| note(&i.to_string(), &format!("n{i}"))).collect();
        load(&mut state, notes, 2);

        state.move_selection_up();
        assert_eq!(state.selected_index, 11);

        let items = state.compute_viewmodel(24, 100).body.notes.unwrap();
        assert_eq!(items.len(), 12);
        assert_eq!(items[0].title, "n0");
        assert!(items[11].is_selected);
    }

    #[test]
    fn selection_wraps_and_long_lists_are_windowed() {
        let mut state = state();
        let notes = (0..30).map(|i| note(&i.to_string(), &format!("n{i}"))).collect();
        load(&mut state, notes, 3);

        state.move_selection_up();
        assert_eq!(state.selected_index, 29);

        let vm = state.compute_viewmodel(20, 80);
        let items = vm.body.notes.unwrap();
        assert_eq!(items.len(), 20 - CHROME_ROWS);
        assert!(items.last().unwrap().is_selected);
    }

    #[test]
    fn modal_and_footer_follow_form_focus() {
        let mut state = state();
        state.modal.open();
        if let Some(form) = state.modal.form_mut() {
            form.title = "Plan".to_string();
            form.next_field();
            form.next_field();
        }

        let vm = state.compute_viewmodel(24, 80);
        let modal = vm.modal.unwrap();
        assert_eq!(modal.fields[0].value, "Plan");
        assert!(modal.fields[2].focused);
        assert_eq!(modal.fields[2].value, "< Todo >");
        assert!(vm.footer.keybindings.contains("Tab"));
        assert!(!vm.toolbar.search_bar.focused);
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ÄÖÜäöüß-long-title", 8), "ÄÖÜäö...");
    }
}
