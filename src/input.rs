//! Input handling module
//!
//! Reads terminal events and turns them into what the event loop cares about:
//! a session [`Event`], a request to redraw, or nothing at all.

use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use std::collections::VecDeque;
use std::io;

use crate::components::keybindings::KeybindingContext;
use crate::session::Event;

/// What the event loop should do with one terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Feed this event into the session
    Session(Event),
    /// Nothing changed in the session but the screen must be redrawn
    Redraw,
    /// Unbound key or uninteresting event
    Ignore,
}

/// Blocking source of terminal events
pub trait EventSource {
    /// Wait for the next terminal event
    fn next_event(&mut self) -> io::Result<TermEvent>;
}

/// Reads events from the real terminal via crossterm
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<TermEvent> {
        event::read()
    }
}

/// Replays a fixed list of events; fails once the list is exhausted
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<TermEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = TermEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> io::Result<TermEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted events"))
    }
}

/// Classify a terminal event using the keybinding registry
pub fn map_event(keybindings: &KeybindingContext, event: &TermEvent) -> InputAction {
    match event {
        // Windows also reports releases; only presses and repeats count
        TermEvent::Key(key) if key.kind != KeyEventKind::Release => keybindings
            .resolve(key)
            .map_or(InputAction::Ignore, InputAction::Session),
        TermEvent::Resize(_, _) => InputAction::Redraw,
        _ => InputAction::Ignore,
    }
}
