//! User interface rendering module
//!
//! - `menus` - the pure menu projection ([`MenuRenderer`], [`MenuView`])
//!
//! This module only puts an already rendered [`MenuView`] into a frame.

pub mod menus;

pub use menus::{MenuRenderer, MenuView, MENU_TITLE};

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a menu view, scrolled so the cursor line stays visible
pub fn draw_menu(f: &mut Frame, view: &MenuView) {
    let area: Rect = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let offset = scroll_offset(view.cursor_row, area.height as usize);
    let paragraph = Paragraph::new(view.text.clone())
        .block(Block::default().borders(Borders::NONE))
        .scroll((offset, 0));
    f.render_widget(paragraph, area);
}

/// First visible row so that `cursor_row` fits inside `height` rows
///
/// The menu stays pinned to the top until the cursor would fall off the
/// bottom of the screen.
pub fn scroll_offset(cursor_row: Option<usize>, height: usize) -> u16 {
    match cursor_row {
        Some(row) if height > 0 && row >= height => {
            u16::try_from(row + 1 - height).unwrap_or(u16::MAX)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scroll_while_cursor_fits() {
        assert_eq!(scroll_offset(Some(0), 10), 0);
        assert_eq!(scroll_offset(Some(9), 10), 0);
        assert_eq!(scroll_offset(None, 10), 0);
    }

    #[test]
    fn test_scrolls_cursor_onto_last_row() {
        assert_eq!(scroll_offset(Some(10), 10), 1);
        assert_eq!(scroll_offset(Some(25), 10), 16);
    }

    #[test]
    fn test_zero_height_never_scrolls() {
        assert_eq!(scroll_offset(Some(5), 0), 0);
    }
}
