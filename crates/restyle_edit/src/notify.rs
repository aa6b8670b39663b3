//! Change notification channel
//!
//! Every mutation, reset, history step and selection transition is emitted
//! as a [`ChangeEvent`] to registered observers: the panel renderer, the
//! highlighter, and the cross-context messaging bridge. Observers are plain
//! closures; the engine is single-threaded per the execution model, so no
//! `Send`/`Sync` bounds apply.

use restyle_dom::ElementId;
use tracing::trace;

use crate::history::ChangeRecord;

/// Direction of a history navigation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// A notification from the editing engine
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeEvent {
    /// An inline property changed (removal carries an empty `new_value`)
    PropertyChanged {
        element: ElementId,
        property: String,
        old_value: String,
        new_value: String,
    },
    /// All edits for an element were rolled back
    ElementReset {
        element: ElementId,
        changes_count: usize,
    },
    /// A history step was applied
    History {
        action: HistoryAction,
        record: ChangeRecord,
    },
    /// The session was activated or deactivated
    ActiveChanged { active: bool },
    /// The selected element changed (`None` on deselect)
    SelectionChanged { element: Option<ElementId> },
    /// The hover highlight target changed (`None` hides it)
    HoverChanged { element: Option<ElementId> },
}

/// Observer callback type
pub type ChangeHandler = Box<dyn Fn(&ChangeEvent)>;

/// Fans change events out to registered observers
#[derive(Default)]
pub struct ChangeDispatcher {
    handlers: Vec<ChangeHandler>,
}

impl ChangeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for every subsequent event
    pub fn register<F>(&mut self, handler: F)
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Deliver an event to all observers, in registration order
    pub fn emit(&self, event: &ChangeEvent) {
        trace!(?event, "change event");
        for handler in &self.handlers {
            handler(event);
        }
    }
}
