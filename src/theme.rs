//! Menu theme and styling
//!
//! All colors, styles and marker glyphs used by the menu live in a [`Theme`]
//! value that is handed to the renderer. There is no process-wide style state.
//!
//! # Usage
//! ```rust
//! use kamae::theme::Theme;
//!
//! let theme = Theme::default();
//! let title_style = theme.title;
//!
//! // Unstyled output, e.g. for `--no-color`
//! let plain = Theme::plain();
//! assert_eq!(plain.cursor_marker, theme.cursor_marker);
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Color palette for the default theme
pub struct Colors;

impl Colors {
    /// Title accent (violet)
    pub const TITLE: Color = Color::Rgb(124, 58, 237);

    /// Pass and category headings (emerald)
    pub const HEADING: Color = Color::Rgb(5, 150, 105);

    /// Checked item text (green)
    pub const SELECTED: Color = Color::Rgb(16, 185, 129);

    /// Unchecked item text (slate)
    pub const UNSELECTED: Color = Color::Rgb(107, 114, 128);

    /// Help line (light gray)
    pub const HELP: Color = Color::Rgb(156, 163, 175);

    /// Selection count (red)
    pub const SUMMARY: Color = Color::Rgb(220, 38, 38);
}

// =============================================================================
// THEME
// =============================================================================

/// Styles and glyphs for one rendering of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    /// `RECOMMENDED APPLICATIONS` / `OPTIONAL APPLICATIONS`
    pub pass_heading: Style,
    pub category: Style,
    pub selected: Style,
    pub unselected: Style,
    pub help: Style,
    pub summary: Style,
    /// Extra emphasis for the line under the cursor
    pub cursor_line: Modifier,
    pub cursor_marker: &'static str,
    pub no_cursor_marker: &'static str,
    pub checked_marker: &'static str,
    pub unchecked_marker: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        let bold = Modifier::BOLD;
        Self {
            title: Style::default().fg(Colors::TITLE).add_modifier(bold),
            pass_heading: Style::default().fg(Colors::HEADING).add_modifier(bold),
            category: Style::default().fg(Colors::HEADING),
            selected: Style::default().fg(Colors::SELECTED),
            unselected: Style::default().fg(Colors::UNSELECTED),
            help: Style::default().fg(Colors::HELP),
            summary: Style::default().fg(Colors::SUMMARY).add_modifier(bold),
            cursor_line: bold,
            ..Self::plain()
        }
    }
}

impl Theme {
    /// Theme without any colors or modifiers; glyphs are unchanged
    pub fn plain() -> Self {
        Self {
            title: Style::default(),
            pass_heading: Style::default(),
            category: Style::default(),
            selected: Style::default(),
            unselected: Style::default(),
            help: Style::default(),
            summary: Style::default(),
            cursor_line: Modifier::empty(),
            cursor_marker: ">",
            no_cursor_marker: " ",
            checked_marker: "✓",
            unchecked_marker: " ",
        }
    }

    /// Item style for a checked or unchecked line
    pub fn item(&self, checked: bool, under_cursor: bool) -> Style {
        let base = if checked { self.selected } else { self.unselected };
        if under_cursor {
            base.add_modifier(self.cursor_line)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_has_no_styles() {
        let theme = Theme::plain();
        assert_eq!(theme.title, Style::default());
        assert_eq!(theme.item(true, true), Style::default());
    }

    #[test]
    fn test_default_theme_distinguishes_checked_items() {
        let theme = Theme::default();
        assert_ne!(theme.item(true, false), theme.item(false, false));
        assert_eq!(theme.item(true, false).fg, Some(Colors::SELECTED));
    }

    #[test]
    fn test_cursor_line_is_emphasized() {
        let theme = Theme::default();
        assert!(theme
            .item(false, true)
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_themes_share_glyphs() {
        let (colored, plain) = (Theme::default(), Theme::plain());
        assert_eq!(colored.checked_marker, plain.checked_marker);
        assert_eq!(colored.cursor_marker, ">");
    }
}
