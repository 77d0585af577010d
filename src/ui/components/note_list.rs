//! Note list renderer.
//!
//! Each note is one row with TITLE, TAG, CREATED and NOTE columns. It
//! supports selection highlighting and search match highlighting on the title.

use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoteItem;

const MARGIN: usize = 1;
const TITLE_WIDTH: usize = 31;
const TAG_WIDTH: usize = 11;
const AGE_WIDTH: usize = 10;
const GUTTER: usize = 2;

/// Width of everything before the snippet column.
const FIXED_WIDTH: usize = MARGIN + TITLE_WIDTH + TAG_WIDTH + AGE_WIDTH + GUTTER;

/// Prints dimmed column captions at the cursor.
pub fn render_captions(theme: &Theme, cols: usize) {
    let captions = format!(
        "{}{}{}{}{}NOTE",
        " ".repeat(MARGIN),
        fit("TITLE", TITLE_WIDTH),
        fit("TAG", TAG_WIDTH),
        fit("CREATED", AGE_WIDTH),
        " ".repeat(GUTTER),
    );
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&captions, cols));
    print!("{}", Theme::reset());
}

/// Renders all note rows starting at the specified row.
///
/// # Parameters
///
/// * `first_row` - Row of the first note (1-indexed)
/// * `last_row` - Last row available to the list, inclusive
/// * `notes` - Notes to draw; `None` draws nothing (loading, error, or an
///   empty result)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// Notes beyond `last_row` are not drawn. The view model already windows the
/// list around the selection, so in practice every item fits.
pub fn render_note_list(
    first_row: usize,
    last_row: usize,
    notes: Option<&[NoteItem]>,
    theme: &Theme,
    cols: usize,
) {
    let Some(notes) = notes else {
        return;
    };

    for (row, note) in (first_row..=last_row).zip(notes) {
        render_note_row(row, note, theme, cols);
    }
}

/// Renders a single note row.
///
/// # Layout
///
/// ```text
///  TITLE (31)                     TAG (11)   CREATED (10)  NOTE (rest)
/// ```
///
/// # Styling Precedence
///
/// 1. Selection background and foreground for the whole row (if selected)
/// 2. Title match highlights (unselected rows only)
/// 3. Tag and age colors, then the normal text color
///
/// The row is padded to the full width so the selection background spans it.
fn render_note_row(row: usize, note: &NoteItem, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    let base_fg = if note.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}", Theme::fg(base_fg));

    print!("{}", " ".repeat(MARGIN));
    let title_len = note.title.chars().count().min(TITLE_WIDTH);
    helpers::render_highlighted_text(
        &note.title,
        &note.highlight_ranges,
        theme,
        note.is_selected,
        base_fg,
    );
    if note.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }
    print!("{}", " ".repeat(TITLE_WIDTH - title_len));

    if !note.is_selected {
        print!("{}", Theme::fg(&theme.colors.tag_fg));
    }
    print!("{}", fit(&note.tag, TAG_WIDTH));

    if !note.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&note.age, AGE_WIDTH));
    print!("{}", " ".repeat(GUTTER));
    print!("{}", fit(&note.snippet, cols.saturating_sub(FIXED_WIDTH)));

    print!("{}", Theme::reset());
}
