//! Menu rendering module
//!
//! Projects a catalog and session onto styled text: recommended items first,
//! then optional ones, each pass grouped by category in first-seen order.
//! Rendering is a pure function of its inputs.

use ratatui::text::{Line, Span, Text};
use strum::IntoEnumIterator;

use crate::catalog::{Catalog, CatalogItem};
use crate::components::keybindings::KeybindingContext;
use crate::session::Session;
use crate::theme::Theme;
use crate::types::Priority;

/// Title shown on the first line of the menu
pub const MENU_TITLE: &str = "kamae - Bootstrap Application Installer";

/// One rendered frame of the menu
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuView {
    pub text: Text<'static>,
    /// Row of the line under the cursor, used to scroll it into view
    pub cursor_row: Option<usize>,
}

impl MenuView {
    pub fn is_empty(&self) -> bool {
        self.text.lines.is_empty()
    }

    /// The view without styling, one terminal row per line
    pub fn to_plain_string(&self) -> String {
        self.text
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders the selection menu with a fixed theme and help line
#[derive(Debug, Clone)]
pub struct MenuRenderer {
    theme: Theme,
    help: String,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new(Theme::default(), &KeybindingContext::default())
    }
}

impl MenuRenderer {
    pub fn new(theme: Theme, keybindings: &KeybindingContext) -> Self {
        Self {
            theme,
            help: keybindings.help_line(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render the menu for `session`; a terminal session renders nothing
    pub fn render(&self, catalog: &Catalog, session: &Session) -> MenuView {
        if session.is_terminal() {
            return MenuView::default();
        }

        let theme = &self.theme;
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(MENU_TITLE, theme.title)),
            Line::default(),
        ];
        let mut cursor_row = None;

        for (pass_index, priority) in Priority::iter().enumerate() {
            let categories = categories_in_pass(catalog, priority);
            if categories.is_empty() {
                continue;
            }

            if pass_index > 0 && lines.len() > 2 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(priority.heading(), theme.pass_heading)));

            for category in categories {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("  {}:", title_case(category)),
                    theme.category,
                )));

                let members = catalog
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.priority() == priority && item.category() == category);

                for (index, item) in members {
                    let under_cursor = index == session.cursor();
                    if under_cursor {
                        cursor_row = Some(lines.len());
                    }
                    lines.push(self.item_line(item, under_cursor, session.is_selected(index)));
                }
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(self.help.clone(), theme.help)));
        lines.push(Line::from(Span::styled(
            format!("Selected: {} applications", session.selected_count()),
            theme.summary,
        )));

        MenuView {
            text: Text::from(lines),
            cursor_row,
        }
    }

    fn item_line(&self, item: &CatalogItem, under_cursor: bool, checked: bool) -> Line<'static> {
        let theme = &self.theme;
        let cursor = if under_cursor {
            theme.cursor_marker
        } else {
            theme.no_cursor_marker
        };
        let check = if checked {
            theme.checked_marker
        } else {
            theme.unchecked_marker
        };

        Line::from(Span::styled(
            format!("    {cursor} [{check}] {}", item.label()),
            theme.item(checked, under_cursor),
        ))
    }
}

/// Categories with at least one item of `priority`, in first-seen order
fn categories_in_pass(catalog: &Catalog, priority: Priority) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for item in catalog.iter().filter(|item| item.priority() == priority) {
        if !categories.contains(&item.category()) {
            categories.push(item.category());
        }
    }
    categories
}

/// Capitalize the first letter of every word
///
/// A word starts after any character that is neither alphanumeric nor `_`,
/// so `web-browsers` becomes `Web-Browsers`.
fn title_case(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut word_start = true;
    for c in category.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::manifest::{Application, CategoryGroup};
    use crate::session::Event;
    use crate::types::InstallMechanism;

    fn catalog() -> Catalog {
        build_catalog(
            &[
                CategoryGroup::new(
                    "dev",
                    vec![Application::new("A", "a", InstallMechanism::Brew)],
                ),
                CategoryGroup::new("util", vec![Application::app_store("C", "c", "123")]),
            ],
            &[CategoryGroup::new(
                "dev",
                vec![Application::new("B", "b", InstallMechanism::BrewCask)],
            )],
        )
        .expect("catalog")
    }

    fn renderer() -> MenuRenderer {
        MenuRenderer::new(Theme::plain(), &KeybindingContext::new())
    }

    #[test]
    fn test_fresh_session_layout() {
        let catalog = catalog();
        let view = renderer().render(&catalog, &Session::new(&catalog));
        let expected = [
            "kamae - Bootstrap Application Installer",
            "",
            "RECOMMENDED APPLICATIONS",
            "",
            "  Dev:",
            "    > [✓] A (recommended)",
            "",
            "  Util:",
            "      [✓] C (recommended)",
            "",
            "OPTIONAL APPLICATIONS",
            "",
            "  Dev:",
            "      [ ] B (optional)",
            "",
            "Navigation: ↑/↓ or k/j to move, space to toggle, enter to install, q or ctrl+c to quit",
            "Selected: 2 applications",
        ]
        .join("\n");
        assert_eq!(view.to_plain_string(), expected);
        assert_eq!(view.cursor_row, Some(5));
    }

    #[test]
    fn test_cursor_follows_catalog_index() {
        let catalog = catalog();
        // Catalog order is A, C, B; index 2 is the optional item
        let session = Session::new(&catalog)
            .transition(Event::MoveDown)
            .transition(Event::MoveDown);
        let view = renderer().render(&catalog, &session);
        let plain = view.to_plain_string();
        assert!(plain.contains("    > [ ] B (optional)"));
        assert!(plain.contains("      [✓] A (recommended)"));
        assert_eq!(view.cursor_row, Some(13));
    }

    #[test]
    fn test_empty_pass_is_omitted() {
        let catalog = build_catalog(
            &[CategoryGroup::new(
                "dev",
                vec![Application::new("A", "a", InstallMechanism::Brew)],
            )],
            &[],
        )
        .expect("catalog");
        let plain = renderer().render(&catalog, &Session::new(&catalog)).to_plain_string();
        assert!(plain.contains("RECOMMENDED APPLICATIONS"));
        assert!(!plain.contains("OPTIONAL APPLICATIONS"));
    }

    #[test]
    fn test_terminal_session_renders_nothing() {
        let catalog = catalog();
        let session = Session::new(&catalog).transition(Event::Confirm);
        let view = renderer().render(&catalog, &session);
        assert!(view.is_empty());
        assert_eq!(view.to_plain_string(), "");
        assert_eq!(view.cursor_row, None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("dev"), "Dev");
        assert_eq!(title_case("web browsers"), "Web Browsers");
        assert_eq!(title_case("web-browsers"), "Web-Browsers");
        assert_eq!(title_case("dev/ops tools"), "Dev/Ops Tools");
        assert_eq!(title_case("mac_apps"), "Mac_apps");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_selected_items_use_selected_style() {
        let catalog = catalog();
        let renderer = MenuRenderer::default();
        let view = renderer.render(&catalog, &Session::new(&catalog));
        let checked_line = &view.text.lines[8];
        assert_eq!(checked_line.spans[0].style, renderer.theme().selected);
    }
}
