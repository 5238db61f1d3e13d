//! Keybinding registry
//!
//! Maps raw crossterm key presses onto session [`Event`]s and produces the
//! help line shown under the menu. All key knowledge lives here; the session
//! only ever sees abstract events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Event;

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub event: Event,
    pub display: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, event: Event, display: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            event,
            display: display.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(key: KeyCode, modifiers: KeyModifiers, event: Event, display: &str) -> Self {
        Self {
            key,
            modifiers,
            event,
            display: display.to_string(),
        }
    }

    /// Whether a key press triggers this binding
    ///
    /// Plain bindings do not fire while Ctrl or Alt is held; Shift is ignored
    /// because terminals report it inconsistently for characters.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.code != self.key {
            return false;
        }
        if self.modifiers.is_empty() {
            !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        } else {
            key.modifiers.contains(self.modifiers)
        }
    }
}

/// One entry of the help line, e.g. `space to toggle`
///
/// The keys are not stored: they come from the bindings registered for
/// `events`, so the help line cannot drift from the actual key map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpHint {
    pub events: Vec<Event>,
    pub action: String,
}

/// Keybinding registry for the selection menu
#[derive(Debug, Clone)]
pub struct KeybindingContext {
    bindings: Vec<Keybinding>,
    hints: Vec<HelpHint>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a registry with the default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            bindings: Vec::new(),
            hints: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.bindings = vec![
            Keybinding::new(KeyCode::Up, Event::MoveUp, "↑"),
            Keybinding::new(KeyCode::Char('k'), Event::MoveUp, "k"),
            Keybinding::new(KeyCode::Down, Event::MoveDown, "↓"),
            Keybinding::new(KeyCode::Char('j'), Event::MoveDown, "j"),
            Keybinding::new(KeyCode::Char(' '), Event::ToggleCurrent, "space"),
            Keybinding::new(KeyCode::Enter, Event::Confirm, "enter"),
            Keybinding::new(KeyCode::Char('q'), Event::Quit, "q"),
            Keybinding::with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL, Event::Quit, "ctrl+c"),
        ];

        self.hints = vec![
            Self::hint(&[Event::MoveUp, Event::MoveDown], "move"),
            Self::hint(&[Event::ToggleCurrent], "toggle"),
            Self::hint(&[Event::Confirm], "install"),
            Self::hint(&[Event::Quit], "quit"),
        ];
    }

    fn hint(events: &[Event], action: &str) -> HelpHint {
        HelpHint {
            events: events.to_vec(),
            action: action.to_string(),
        }
    }

    /// Register an extra binding; it shows up in the help line of any hint
    /// covering its event
    pub fn bind(&mut self, binding: Keybinding) {
        self.bindings.push(binding);
    }

    /// Key labels for a hint
    ///
    /// The n-th binding of each event is paired up (`↑/↓`), and the pairs are
    /// listed as alternatives (`↑/↓ or k/j`).
    fn hint_keys(&self, events: &[Event]) -> String {
        let per_event: Vec<Vec<&str>> = events
            .iter()
            .map(|&event| self.bindings_for(event).map(|b| b.display.as_str()).collect())
            .collect();
        let width = per_event.iter().map(Vec::len).max().unwrap_or(0);

        (0..width)
            .map(|i| {
                per_event
                    .iter()
                    .filter_map(|keys| keys.get(i).copied())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect::<Vec<_>>()
            .join(" or ")
    }

    /// Look up the event bound to a key press
    pub fn resolve(&self, key: &KeyEvent) -> Option<Event> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(key))
            .map(|binding| binding.event)
    }

    /// All bindings for one event, in registration order
    pub fn bindings_for(&self, event: Event) -> impl Iterator<Item = &Keybinding> {
        self.bindings.iter().filter(move |binding| binding.event == event)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Help text shown under the menu
    pub fn help_line(&self) -> String {
        let hints: Vec<String> = self
            .hints
            .iter()
            .map(|hint| format!("{} to {}", self.hint_keys(&hint.events), hint.action))
            .collect();
        format!("Navigation: {}", hints.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_vim_keys_move() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.resolve(&press(KeyCode::Up)), Some(Event::MoveUp));
        assert_eq!(ctx.resolve(&press(KeyCode::Char('k'))), Some(Event::MoveUp));
        assert_eq!(ctx.resolve(&press(KeyCode::Down)), Some(Event::MoveDown));
        assert_eq!(ctx.resolve(&press(KeyCode::Char('j'))), Some(Event::MoveDown));
    }

    #[test]
    fn test_toggle_confirm_quit() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.resolve(&press(KeyCode::Char(' '))), Some(Event::ToggleCurrent));
        assert_eq!(ctx.resolve(&press(KeyCode::Enter)), Some(Event::Confirm));
        assert_eq!(ctx.resolve(&press(KeyCode::Char('q'))), Some(Event::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_but_plain_c_does_nothing() {
        let ctx = KeybindingContext::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(ctx.resolve(&ctrl_c), Some(Event::Quit));
        assert_eq!(ctx.resolve(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_ctrl_j_is_not_move_down() {
        let ctx = KeybindingContext::new();
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(ctx.resolve(&ctrl_j), None);
    }

    #[test]
    fn test_unbound_keys_resolve_to_nothing() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.resolve(&press(KeyCode::Char('x'))), None);
        assert_eq!(ctx.resolve(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_help_line() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.help_line(),
            "Navigation: ↑/↓ or k/j to move, space to toggle, enter to install, q or ctrl+c to quit"
        );
        assert_eq!(ctx.bindings_for(Event::Quit).count(), 2);
    }

    #[test]
    fn test_help_line_follows_registered_bindings() {
        let mut ctx = KeybindingContext::new();
        ctx.bind(Keybinding::new(KeyCode::Char('x'), Event::ToggleCurrent, "x"));
        assert!(ctx.help_line().contains("space or x to toggle"));
        assert_eq!(ctx.resolve(&press(KeyCode::Char('x'))), Some(Event::ToggleCurrent));
    }
}
