//! Creation form overlay.
//!
//! Drawn last over the base layout, centered:
//!
//! ```text
//! ┌─ Create note ──────────────────────┐
//! │                                    │
//! │ > Title    Groceries_              │
//! │   Content  milk, eggs              │
//! │   Tag      < Shopping >            │
//! │                                    │
//! │ Title is required                  │
//! └────────────────────────────────────┘
//! ```

use crate::ui::helpers::{fit, fit_tail, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldInfo, ModalInfo};

const MAX_MODAL_WIDTH: usize = 64;
const LABEL_WIDTH: usize = 9;

/// Marker, spaces and label in front of every field value.
const FIELD_PREFIX_WIDTH: usize = 3 + LABEL_WIDTH;

/// Top border, blank, blank, status line, bottom border.
const FRAME_ROWS: usize = 5;

/// Renders the creation form centered over whatever is already on screen.
///
/// # Parameters
///
/// * `modal` - Form fields, focus, inline error and submission state
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// The box is `min(cols - 4, 64)` columns wide and one row per field plus
/// five frame rows tall. The status row shows "Creating note..." while a
/// submission is in flight, otherwise the inline error if any. Nothing is
/// drawn when the pane is too narrow for a label and a few characters of
/// input.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH);
    if width < FIELD_PREFIX_WIDTH + 6 {
        return;
    }
    let inner = width - 2;
    let height = modal.fields.len() + FRAME_ROWS;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = (cols - width) / 2 + 1;

    let line = |row: usize, text: &str, fg: &str| {
        position_cursor(row, left);
        print!("{}", Theme::fg(&theme.colors.modal_border));
        print!("│");
        print!("{}", Theme::fg(fg));
        print!("{}", fit(text, inner));
        print!("{}", Theme::fg(&theme.colors.modal_border));
        print!("│");
        print!("{}", Theme::reset());
    };

    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.modal_border));
    let title: String = modal.title.chars().take(inner.saturating_sub(1)).collect();
    print!("┌─{}", Theme::bold());
    print!("{title}{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.modal_border));
    print!("{}┐", "─".repeat(inner.saturating_sub(1 + title.chars().count())));
    print!("{}", Theme::reset());

    let mut row = top + 1;
    line(row, "", &theme.colors.text_normal);
    row += 1;

    for field in &modal.fields {
        let fg = if field.focused {
            &theme.colors.search_bar_focus
        } else {
            &theme.colors.text_normal
        };
        line(row, &field_line(field, inner), fg);
        row += 1;
    }

    line(row, "", &theme.colors.text_normal);
    row += 1;

    if modal.submitting {
        line(row, " Creating note...", &theme.colors.loader_fg);
    } else if let Some(error) = &modal.error {
        line(row, &format!(" {error}"), &theme.colors.error_fg);
    } else {
        line(row, "", &theme.colors.text_normal);
    }
    row += 1;

    position_cursor(row, left);
    print!("{}", Theme::fg(&theme.colors.modal_border));
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}

/// Formats one field row exactly `inner` characters wide.
///
/// The focused text field gets a `_` cursor and keeps the end of its value
/// in view, so what is being typed stays visible once the value outgrows the
/// box. Other fields show the start of their value. The tag field is a
/// selector (`< Tag >`) and never gets a cursor.
fn field_line(field: &FormFieldInfo, inner: usize) -> String {
    let marker = if field.focused { ">" } else { " " };
    let prefix = format!(" {marker} {}", fit(&field.label, LABEL_WIDTH));
    let value_width = inner.saturating_sub(FIELD_PREFIX_WIDTH);

    let value = if field.focused && !field.value.starts_with('<') {
        fit_tail(&format!("{}_", field.value), value_width)
    } else {
        fit(&field.value, value_width)
    };
    format!("{prefix}{value}")
}
