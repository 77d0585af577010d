//! Toasts, stacked in the top-right corner over the header.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

const RIGHT_MARGIN: usize = 1;

/// Renders live toasts, oldest on top, right-aligned from row 1 down.
///
/// # Parameters
///
/// * `toasts` - Toasts to draw, oldest first
/// * `theme` - Active color theme (`toast_fg` / `toast_bg`)
/// * `cols` - Terminal width in columns
///
/// Messages wider than the pane are cut to fit. Toasts are drawn over the
/// header region and never move the base layout.
pub fn render_toasts(toasts: &[ToastInfo], theme: &Theme, cols: usize) {
    for (offset, toast) in toasts.iter().enumerate() {
        let max_len = cols.saturating_sub(RIGHT_MARGIN + 2);
        let message: String = toast.message.chars().take(max_len).collect();
        let width = message.chars().count() + 2;
        let col = cols.saturating_sub(width + RIGHT_MARGIN) + 1;

        position_cursor(1 + offset, col);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.toast_fg));
        print!("{}", Theme::bg(&theme.colors.toast_bg));
        print!(" {message} ");
        print!("{}", Theme::reset());
    }
}
