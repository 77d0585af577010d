//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across components. Everything operates on
//! character indices, not byte indices, so note titles in any script render
//! and highlight correctly.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
///
/// # Parameters
///
/// * `row` - Target row (1-indexed)
/// * `col` - Target column (1-indexed)
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Pads or cuts `text` to exactly `width` characters.
///
/// Cuts from the right, so the start of the text stays visible. Counts
/// characters, not bytes.
///
/// # Parameters
///
/// * `text` - Text to fit
/// * `width` - Exact number of characters to produce
///
/// # Returns
///
/// `text` truncated or right-padded with spaces to `width` characters.
///
/// # Example
///
/// ```rust
/// use notepane::ui::helpers::fit;
///
/// assert_eq!(fit("notes", 3), "not");
/// assert_eq!(fit("notes", 7), "notes  ");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.push_str(&" ".repeat(width - len));
    out
}

/// Like [`fit`], but cuts from the left so the end of the text stays
/// visible. Used for inputs being typed into, where the cursor sits at the
/// end.
///
/// # Parameters
///
/// * `text` - Text to fit
/// * `width` - Exact number of characters to produce
///
/// # Returns
///
/// The last `width` characters of `text`, right-padded with spaces when the
/// text is shorter.
///
/// # Example
///
/// ```rust
/// use notepane::ui::helpers::fit_tail;
///
/// assert_eq!(fit_tail("groceries_", 4), "ies_");
/// assert_eq!(fit_tail("milk", 6), "milk  ");
/// ```
#[must_use]
pub fn fit_tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return fit(text, width);
    }
    text.chars().skip(len - width).collect()
}

/// Left padding that centers `len` characters in `width`.
#[must_use]
pub const fn centered_padding(len: usize, width: usize) -> usize {
    width.saturating_sub(len) / 2
}

/// Renders text with highlighted character ranges for search matches.
///
/// # Parameters
///
/// * `text` - The text to render
/// * `ranges` - Character index ranges to highlight `(start, end)`, end
///   exclusive; out-of-order or out-of-bounds ranges are skipped
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Whether the row is selected (disables match highlighting
///   so it does not fight the selection background)
/// * `restore_fg` - Foreground re-applied after each highlighted section
///
/// # Output
///
/// Prints to stdout:
/// - Normal sections: whatever color is active, then `restore_fg`
/// - Highlighted sections: `match_highlight_fg` + `match_highlight_bg`
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore_fg: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(restore_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_cuts_by_characters() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("заметка", 3), "зам");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn fit_tail_keeps_the_end_of_long_input() {
        assert_eq!(fit_tail("abcdef", 3), "def");
        assert_eq!(fit_tail("ab", 4), "ab  ");
        assert_eq!(fit_tail("пример", 2), "ер");
    }

    #[test]
    fn centered_padding_favors_left_on_odd_space() {
        assert_eq!(centered_padding(4, 11), 3);
        assert_eq!(centered_padding(20, 10), 0);
    }
}
