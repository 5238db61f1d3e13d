//! Selection Session State Machine
//!
//! A [`Session`] is the cursor-and-selection state of one menu run. It only
//! changes through [`Session::transition`], which takes the current value and
//! an [`Event`] and returns the next value. Nothing here touches the terminal.
//!
//! # Lifecycle
//!
//! ```text
//! Session::new(catalog)          (recommended items pre-selected, cursor 0)
//!     │  MoveUp / MoveDown / ToggleCurrent   (any number of times)
//!     ├── Confirm ──> terminal, Outcome::Confirmed  (selection is the answer)
//!     └── Quit ─────> terminal, Outcome::Cancelled  (selection is discarded)
//! ```
//!
//! Once terminal, every further event is ignored.
//!
//! # Invariants
//!
//! - `cursor < len`, or `cursor == 0` when the catalog is empty
//! - every selected index is `< len`

use std::collections::BTreeSet;
use strum::Display;
use tracing::debug;

use crate::catalog::Catalog;

/// Abstract input events, already decoupled from raw key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Event {
    MoveUp,
    MoveDown,
    ToggleCurrent,
    Confirm,
    Quit,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The user accepted the current selection
    Confirmed,
    /// The user quit; nothing should be installed
    Cancelled,
}

/// Cursor, selection and termination state for one menu run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    len: usize,
    cursor: usize,
    selected: BTreeSet<usize>,
    outcome: Option<Outcome>,
}

impl Session {
    /// Fresh session over `catalog` with the default-selected items checked
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            len: catalog.len(),
            cursor: 0,
            selected: catalog.default_selection().collect(),
            outcome: None,
        }
    }

    /// Session for the non-interactive path: defaults, immediately confirmed
    pub fn confirmed_defaults(catalog: &Catalog) -> Self {
        Self::new(catalog).transition(Event::Confirm)
    }

    /// Apply one event and return the resulting session
    #[must_use]
    pub fn transition(mut self, event: Event) -> Self {
        if self.is_terminal() {
            return self;
        }

        match event {
            Event::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Event::MoveDown => {
                if self.cursor + 1 < self.len {
                    self.cursor += 1;
                }
            }
            Event::ToggleCurrent => {
                if !self.selected.remove(&self.cursor) && self.cursor < self.len {
                    self.selected.insert(self.cursor);
                }
            }
            Event::Confirm => self.outcome = Some(Outcome::Confirmed),
            Event::Quit => self.outcome = Some(Outcome::Cancelled),
        }

        debug!(%event, cursor = self.cursor, selected = self.selected.len(), "Session transition");
        self
    }

    /// Index of the highlighted catalog item
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Currently checked catalog indices, ascending
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Number of catalog items this session ranges over
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once a Confirm or Quit event has been processed
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The selection to install: only present for a confirmed session
    pub fn final_selection(&self) -> Option<&BTreeSet<usize>> {
        match self.outcome {
            Some(Outcome::Confirmed) => Some(&self.selected),
            Some(Outcome::Cancelled) | None => None,
        }
    }
}
