//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! The base layout is always drawn in full; the creation modal and toasts are
//! painted over it afterwards.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output using `print!`. Does not clear the screen; every
/// row of the layout is padded to the full width instead.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Layout structure:
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Toolbar - 3 lines: search box, pagination, create button]
/// [Status line: loader / error / column captions]
/// [Note rows]
/// [Border]
/// [Footer]
/// ```
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = components::render_header(current_row, &vm.header, theme, cols);
    current_row = components::render_border(current_row, &theme.colors.border, cols);
    current_row = components::render_toolbar(current_row, &vm.toolbar, theme, cols);
    current_row = components::render_status(current_row, &vm.body, theme, cols);

    let footer_row = rows.max(current_row + 1);
    let border_row = footer_row - 1;

    let last_list_row = border_row.saturating_sub(1);
    components::render_note_list(current_row, last_list_row, vm.body.notes.as_deref(), theme, cols);

    components::render_border(border_row, &theme.colors.border, cols);
    components::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        components::render_modal(modal, theme, rows, cols);
    }
    components::render_toasts(&vm.toasts, theme, cols);
}
