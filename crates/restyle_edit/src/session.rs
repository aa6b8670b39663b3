//! Editing session facade
//!
//! One [`EditorSession`] exists per activation and owns the three core
//! instances (history lives inside the editor) plus the notification
//! channel; collaborators receive them by reference, never through shared
//! globals. The host constructs the session with loaded preferences,
//! registers its observers, and routes capture-phase input through
//! [`EditorSession::handle_event`] while the session is active.

use restyle_core::{EventDisposition, InputEvent, Preferences};
use restyle_dom::{Document, ElementId};

use crate::editor::StyleEditor;
use crate::history::{ChangeRecord, HistoryStats};
use crate::notify::{ChangeDispatcher, ChangeEvent};
use crate::selection::{SelectionController, SelectionState};

/// A live-edit session over one host document
pub struct EditorSession {
    prefs: Preferences,
    editor: StyleEditor,
    selection: SelectionController,
    observers: ChangeDispatcher,
}

impl EditorSession {
    /// Build a session from loaded preferences
    pub fn new(prefs: Preferences) -> Self {
        Self {
            editor: StyleEditor::with_history_limit(prefs.max_history),
            selection: SelectionController::new(),
            observers: ChangeDispatcher::new(),
            prefs,
        }
    }

    /// Register a change observer (panel renderer, messaging bridge, ...)
    pub fn observe<F>(&mut self, handler: F)
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        self.observers.register(handler);
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_active()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn history_stats(&self) -> HistoryStats {
        self.editor.history().stats()
    }

    /// Start accepting input; no-op when already active
    pub fn activate(&mut self) {
        self.selection.activate(&self.prefs, &self.observers);
    }

    /// Stop accepting input and clear transient selection state
    pub fn deactivate(&mut self) {
        self.selection.deactivate(&self.observers);
    }

    /// Flip activation, the way a toolbar toggle drives the tool
    pub fn toggle(&mut self) {
        if self.is_active() {
            self.deactivate();
        } else {
            self.activate();
        }
    }

    /// Route one capture-phase input event from the host
    pub fn handle_event(&mut self, doc: &mut Document, event: &InputEvent) -> EventDisposition {
        self.selection
            .handle_event(doc, &mut self.editor, &self.observers, event)
    }

    /// Select an element programmatically (panel tree, messaging bridge)
    pub fn select(&mut self, doc: &Document, element: ElementId) {
        self.selection
            .select(doc, &mut self.editor, &self.observers, element);
    }

    pub fn deselect(&mut self) {
        self.selection.deselect(&self.observers);
    }

    // ---------------------------------------------------------------------
    // Editing, with the notification channel wired in
    // ---------------------------------------------------------------------

    pub fn set_property(
        &mut self,
        doc: &mut Document,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> bool {
        self.editor
            .set_property(doc, &self.observers, element, property, value, true)
    }

    pub fn adjust_numeric(
        &mut self,
        doc: &mut Document,
        element: ElementId,
        property: &str,
        delta: f64,
        coarse: bool,
    ) -> bool {
        self.editor
            .adjust_numeric(doc, &self.observers, element, property, delta, coarse)
    }

    pub fn toggle_property(
        &mut self,
        doc: &mut Document,
        element: ElementId,
        property: &str,
    ) -> bool {
        self.editor
            .toggle_property(doc, &self.observers, element, property)
    }

    pub fn remove_property(
        &mut self,
        doc: &mut Document,
        element: ElementId,
        property: &str,
    ) -> bool {
        self.editor
            .remove_property(doc, &self.observers, element, property, true)
    }

    pub fn reset_element(&mut self, doc: &mut Document, element: ElementId) -> usize {
        self.editor.reset_element(doc, &self.observers, element)
    }

    pub fn undo(&mut self, doc: &mut Document) -> Option<ChangeRecord> {
        self.editor.undo(doc, &self.observers)
    }

    pub fn redo(&mut self, doc: &mut Document) -> Option<ChangeRecord> {
        self.editor.redo(doc, &self.observers)
    }

    pub fn css_text(&self, doc: &Document, element: ElementId) -> String {
        self.editor.css_text(doc, element)
    }

    pub fn modified_properties(&self, doc: &Document, element: ElementId) -> Vec<(String, String)> {
        self.editor.modified_properties(doc, element)
    }

    pub fn style_summary(&self, doc: &Document, element: ElementId) -> Vec<(String, String)> {
        self.editor.style_summary(doc, element)
    }

    /// Tear the session down: deactivate and drop all edit bookkeeping
    pub fn shutdown(&mut self) {
        self.deactivate();
        self.editor.clear();
    }
}
