//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: which regions exist, what text
//! they show, and which characters to highlight.
//!
//! # Layout
//!
//! ```text
//! ┌ header ─────────────────────────────────────────┐
//! │ toolbar: [search box]  ‹ 1 … 4 [5] 6 … 9 ›  [+] │
//! │ body: loader / error banner / note list         │
//! │ footer: keybindings                             │
//! └─────────────────────────────────────────────────┘
//!      modal overlay and toasts drawn on top
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title, result summary).
    pub header: HeaderInfo,

    /// Toolbar row; always rendered.
    pub toolbar: ToolbarInfo,

    /// Loader, error banner and note list.
    pub body: BodyInfo,

    /// Creation form overlay, present only while the modal is open.
    pub modal: Option<ModalInfo>,

    /// Live toasts, oldest first.
    pub toasts: Vec<ToastInfo>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Toolbar row: search box, optional pagination, create button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarInfo {
    pub search_bar: SearchBarInfo,

    /// Present only when the displayed result spans more than one page.
    pub pagination: Option<PaginationInfo>,

    /// Label of the create-note button.
    pub create_label: String,
}

/// Search box display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Literal search input, including uncommitted keystrokes.
    pub query: String,

    /// Whether the search box has keyboard focus.
    pub focused: bool,

    /// Whether typed input is waiting for the debounce interval.
    pub pending: bool,
}

/// Pagination control display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub total_pages: u32,
    pub slots: Vec<PageSlot>,
}

/// One cell of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page { number: u32, current: bool },
    /// Collapsed run of pages, drawn as an ellipsis.
    Gap,
}

/// Body region. The loader and the list can coexist while a placeholder is
/// refreshed; error and list never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyInfo {
    pub loader: bool,

    /// Error banner text when the current query failed.
    pub error: Option<String>,

    /// Notes to list; `None` unless the query succeeded with at least one note.
    pub notes: Option<Vec<NoteItem>>,
}

/// Display information for a single note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub title: String,
    pub tag: String,
    /// First line of the content, truncated to fit.
    pub snippet: String,
    /// Relative creation time ("3h ago").
    pub age: String,
    pub is_selected: bool,

    /// Character ranges of `title` matching the committed search.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices, end
    /// exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Creation form overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub title: String,
    pub fields: Vec<FormFieldInfo>,
    /// Inline validation or submission error.
    pub error: Option<String>,
    pub submitting: bool,
}

/// One labelled field of the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldInfo {
    pub label: String,
    pub value: String,
    pub focused: bool,
}

/// A toast as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search").
    pub keybindings: String,
}
