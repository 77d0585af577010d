//! Composable UI component renderers.
//!
//! Each component draws one region of the screen at explicit cursor positions
//! and returns the next free row where that is meaningful.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`toolbar`]: Search box, pagination control, create button
//! - [`status`]: Loader, error banner, column captions
//! - [`note_list`]: Note rows with selection and match highlighting
//! - [`footer`]: Keybinding hints
//! - [`modal`]: Creation form overlay
//! - [`toast`]: Transient notifications

mod footer;
mod header;
mod modal;
mod note_list;
mod status;
mod toast;
mod toolbar;

pub use footer::render_footer;
pub use header::render_header;
pub use modal::render_modal;
pub use note_list::render_note_list;
pub use status::render_status;
pub use toast::render_toasts;
pub use toolbar::render_toolbar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/toolbar, list/footer).
///
/// # Parameters
///
/// * `row` - Row position to render the border (1-indexed)
/// * `color` - Hex color for the border
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}
