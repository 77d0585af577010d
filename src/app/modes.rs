//! Input mode state for the application.
//!
//! The plugin reads keys in one of two modes:
//! - **Browse**: navigate the note list and pages, open the creation form
//! - **Search**: every printable key edits the search box
//!
//! While the modal is open, keys go to the creation form regardless of mode.

/// Current input handling mode.
///
/// Determines which keybindings are active and what the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation mode.
    ///
    /// Available keybindings: j/k (select), h/l (page), / (search),
    /// n (new note), q (quit).
    #[default]
    Browse,

    /// Search box has focus.
    ///
    /// Characters and backspace edit the query; Esc or Enter return to browse.
    Search,
}
