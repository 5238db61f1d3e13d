//! Main application module
//!
//! Owns the selection session for one interactive run and drives it: wait
//! for a terminal event, apply it, redraw, until the session is terminal.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::stdout;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::components::keybindings::KeybindingContext;
use crate::error::{KamaeError, Result};
use crate::input::{map_event, CrosstermEvents, EventSource, InputAction};
use crate::session::Session;
use crate::ui::{self, MenuRenderer};

/// Interactive selection menu over one catalog
pub struct App<'a> {
    catalog: &'a Catalog,
    session: Session,
    renderer: MenuRenderer,
    keybindings: KeybindingContext,
}

impl<'a> App<'a> {
    /// Create an app with a fresh session over `catalog`
    pub fn new(catalog: &'a Catalog, renderer: MenuRenderer, keybindings: KeybindingContext) -> Self {
        Self {
            catalog,
            session: Session::new(catalog),
            renderer,
            keybindings,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the event loop until the session is confirmed or cancelled
    pub fn run<B: Backend, S: EventSource>(
        mut self,
        terminal: &mut Terminal<B>,
        events: &mut S,
    ) -> Result<Session> {
        info!(items = self.catalog.len(), "Starting selection loop");
        self.draw(terminal)?;

        loop {
            let event = events.next_event()?;
            match map_event(&self.keybindings, &event) {
                InputAction::Session(event) => {
                    self.session = self.session.clone().transition(event);
                    if self.session.is_terminal() {
                        break;
                    }
                    self.draw(terminal)?;
                }
                InputAction::Redraw => self.draw(terminal)?,
                InputAction::Ignore => {}
            }
        }

        info!(
            outcome = ?self.session.outcome(),
            selected = self.session.selected_count(),
            "Selection loop finished"
        );
        Ok(self.session)
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = self.renderer.render(self.catalog, &self.session);
        terminal.draw(|f| ui::draw_menu(f, &view))?;
        Ok(())
    }
}

/// Run the menu on the real terminal using the alternate screen
pub fn run_interactive(
    catalog: &Catalog,
    renderer: MenuRenderer,
    keybindings: KeybindingContext,
) -> Result<Session> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| KamaeError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    if let Err(e) = crossterm::execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(KamaeError::terminal(format!(
            "Failed to enter alternate screen: {}",
            e
        )));
    }

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| KamaeError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| {
            App::new(catalog, renderer, keybindings).run(&mut terminal, &mut CrosstermEvents)
        });

    // Cleanup terminal (always attempt cleanup, even if the loop failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::input::ScriptedEvents;
    use crate::manifest::{Application, CategoryGroup};
    use crate::session::Outcome;
    use crate::theme::Theme;
    use crate::types::InstallMechanism;
    use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> TermEvent {
        TermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn catalog() -> Catalog {
        build_catalog(
            &[CategoryGroup::new(
                "dev",
                vec![Application::new("Git", "git", InstallMechanism::Brew)],
            )],
            &[CategoryGroup::new(
                "dev",
                vec![Application::new("Jq", "jq", InstallMechanism::Brew)],
            )],
        )
        .expect("catalog")
    }

    fn app(catalog: &Catalog) -> App<'_> {
        App::new(
            catalog,
            MenuRenderer::new(Theme::plain(), &KeybindingContext::new()),
            KeybindingContext::new(),
        )
    }

    #[test]
    fn test_loop_applies_keys_until_confirm() {
        let catalog = catalog();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        let mut events = ScriptedEvents::new([
            key(KeyCode::Char('j')),
            key(KeyCode::Char(' ')),
            key(KeyCode::Char('x')),
            TermEvent::Resize(80, 20),
            key(KeyCode::Enter),
        ]);

        let session = app(&catalog).run(&mut terminal, &mut events).expect("run");
        assert_eq!(session.outcome(), Some(Outcome::Confirmed));
        assert_eq!(session.selected().len(), 2);
    }

    #[test]
    fn test_loop_stops_on_quit() {
        let catalog = catalog();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        let mut events = ScriptedEvents::new([key(KeyCode::Char('q')), key(KeyCode::Enter)]);

        let session = app(&catalog).run(&mut terminal, &mut events).expect("run");
        assert_eq!(session.outcome(), Some(Outcome::Cancelled));
        assert_eq!(session.final_selection(), None);
    }

    #[test]
    fn test_exhausted_input_is_an_error() {
        let catalog = catalog();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        let mut events = ScriptedEvents::new([key(KeyCode::Down)]);

        let err = app(&catalog).run(&mut terminal, &mut events).unwrap_err();
        assert!(matches!(err, KamaeError::Io(_)));
    }

    #[test]
    fn test_first_frame_shows_menu() {
        let catalog = catalog();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        app(&catalog).draw(&mut terminal).expect("draw");

        let buffer = terminal.backend().buffer();
        let first_row: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(first_row.starts_with("kamae - Bootstrap Application Installer"));
    }
}
