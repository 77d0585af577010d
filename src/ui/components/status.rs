//! Status line between the toolbar and the note list.
//!
//! Shows the loader and the error banner. When neither applies and notes are
//! listed, it carries the column captions instead.

use super::note_list::render_captions;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BodyInfo;

const LOADER_TEXT: &str = " ⠿ Loading notes...";

/// Renders the status line at the specified row.
///
/// # Parameters
///
/// * `row` - Row position for the status line (1-indexed)
/// * `body` - Loader flag, error banner and the listed notes
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///  ⠿ Loading notes... There was an error, please try again...
/// ```
///
/// The loader and the error banner can share the line. With neither present
/// the line holds column captions if notes are listed, blanks otherwise.
pub fn render_status(row: usize, body: &BodyInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 0;
    if body.loader {
        print!("{}", Theme::fg(&theme.colors.loader_fg));
        used = LOADER_TEXT.chars().count().min(cols);
        print!("{}", fit(LOADER_TEXT, used));
    }
    if let Some(error) = &body.error {
        let text = format!(" {error}");
        let space = cols.saturating_sub(used);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("{}", fit(&text, space));
        used += text.chars().count().min(space);
    }

    if used == 0 {
        if body.notes.is_some() {
            render_captions(theme, cols);
        } else {
            print!("{}", " ".repeat(cols));
        }
    } else {
        print!("{}", Theme::reset());
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    print!("{}", Theme::reset());
    row + 1
}
