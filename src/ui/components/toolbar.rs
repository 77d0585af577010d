//! Toolbar component renderer: search box, pagination, create button.
//!
//! ```text
//! ┌──────────────────────┐
//! │ Search: tomcat…      │  ‹ 1 … 4 [5] 6 … 9 ›  [ Create note + ]
//! └──────────────────────┘
//! ```
//!
//! The search box takes roughly half the width; pagination and the button
//! share the middle line to its right. Pagination is omitted entirely when
//! the view model carries none.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageSlot, PaginationInfo, SearchBarInfo, ToolbarInfo};

/// Left margin before the search box.
const TOOLBAR_MARGIN: usize = 1;

const MIN_SEARCH_BOX_WIDTH: usize = 16;

/// Renders the toolbar at the specified row.
///
/// # Parameters
///
/// * `row` - Starting row position for the toolbar (1-indexed)
/// * `toolbar` - Search box text and focus, optional pagination, button label
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 3, since the search box uses 3
/// lines)
///
/// # Rendering Details
///
/// - The search box border uses `search_bar_focus` while focused, otherwise
///   `search_bar_border`
/// - Pagination and the create button are each drawn only if they still fit
///   to the right of the search box; pagination gives way first
pub fn render_toolbar(row: usize, toolbar: &ToolbarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = (cols / 2).max(MIN_SEARCH_BOX_WIDTH).min(cols.saturating_sub(TOOLBAR_MARGIN));
    let inner_width = box_width.saturating_sub(2);
    let border = if toolbar.search_bar.focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(TOOLBAR_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(TOOLBAR_MARGIN + box_width)));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(TOOLBAR_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&search_text(&toolbar.search_bar), inner_width));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    let mut used = TOOLBAR_MARGIN + box_width;
    if let Some(pagination) = &toolbar.pagination {
        used += render_pagination(pagination, theme, cols.saturating_sub(used));
    }
    used += render_button(&toolbar.create_label, theme, cols.saturating_sub(used));
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(TOOLBAR_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(TOOLBAR_MARGIN + box_width)));

    row + 3
}

/// Text inside the search box. A trailing `_` marks the cursor while focused,
/// `…` marks input still waiting for the debounce interval.
fn search_text(search: &SearchBarInfo) -> String {
    let cursor = if search.focused { "_" } else { "" };
    let pending = if search.pending { " …" } else { "" };
    if search.query.is_empty() && !search.focused {
        " Search notes".to_string()
    } else {
        format!(" Search: {}{cursor}{pending}", search.query)
    }
}

/// Cell texts of the pagination control, with arrows.
fn pagination_cells(pagination: &PaginationInfo) -> Vec<(String, bool)> {
    let mut cells = vec![("‹".to_string(), false)];
    cells.extend(pagination.slots.iter().map(|slot| match slot {
        PageSlot::Page { number, current } => (format!(" {number} "), *current),
        PageSlot::Gap => ("…".to_string(), false),
    }));
    cells.push(("›".to_string(), false));
    cells
}

/// Draws the pagination control if it fits in `space` columns. Returns the
/// columns used.
fn render_pagination(pagination: &PaginationInfo, theme: &Theme, space: usize) -> usize {
    let cells = pagination_cells(pagination);
    let width: usize = 2 + cells.iter().map(|(text, _)| text.chars().count() + 1).sum::<usize>();
    if width > space {
        return 0;
    }

    print!("  ");
    for (text, current) in &cells {
        if *current {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.page_current_fg));
            print!("{}", Theme::bg(&theme.colors.page_current_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{text}");
        print!("{} ", Theme::reset());
    }
    width
}

fn render_button(label: &str, theme: &Theme, space: usize) -> usize {
    let text = format!(" {label} ");
    let width = 2 + text.chars().count();
    if width > space {
        return 0;
    }

    print!("  ");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.button_fg));
    print!("{}", Theme::bg(&theme.colors.button_bg));
    print!("{text}");
    print!("{}", Theme::reset());
    width
}
