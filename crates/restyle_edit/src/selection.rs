//! Element selection
//!
//! Tracks which element is active (hovered vs. selected), drives the style
//! editor from keyboard input, and mediates DOM navigation. The machine is
//! `Inactive → Active(hover) → Active(selected)`; deselecting returns to
//! hover mode, deactivating to `Inactive`.
//!
//! The host routes capture-phase pointer and key events into
//! [`SelectionController::handle_event`] only between `activate` and
//! `deactivate`; outside that window the controller passes everything
//! through untouched, so deactivation can never leave residual input
//! handling behind.

use restyle_core::{EventDisposition, InputEvent, KeyCode, KeyEvent, PointerEvent, Preferences};
use restyle_dom::{Document, ElementId};
use tracing::debug;

use crate::editor::StyleEditor;
use crate::notify::{ChangeDispatcher, ChangeEvent};

/// Read view of the controller's state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionState {
    pub hovered: Option<ElementId>,
    pub selected: Option<ElementId>,
    pub hover_mode: bool,
}

/// Hover/select state machine over the host document
pub struct SelectionController {
    active: bool,
    hover_mode: bool,
    keyboard_shortcuts: bool,
    hovered: Option<ElementId>,
    selected: Option<ElementId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            active: false,
            hover_mode: true,
            keyboard_shortcuts: true,
            hovered: None,
            selected: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn state(&self) -> SelectionState {
        SelectionState {
            hovered: self.hovered,
            selected: self.selected,
            hover_mode: self.hover_mode,
        }
    }

    /// Enter hover mode and start accepting input; no-op when active
    pub fn activate(&mut self, prefs: &Preferences, observers: &ChangeDispatcher) {
        if self.active {
            return;
        }
        self.active = true;
        self.hover_mode = prefs.hover_mode;
        self.keyboard_shortcuts = prefs.keyboard_shortcuts;
        debug!("selection activated");
        observers.emit(&ChangeEvent::ActiveChanged { active: true });
    }

    /// Stop accepting input and clear all transient state; idempotent
    pub fn deactivate(&mut self, observers: &ChangeDispatcher) {
        if !self.active {
            return;
        }
        self.active = false;
        if self.hovered.take().is_some() {
            observers.emit(&ChangeEvent::HoverChanged { element: None });
        }
        if self.selected.take().is_some() {
            observers.emit(&ChangeEvent::SelectionChanged { element: None });
        }
        debug!("selection deactivated");
        observers.emit(&ChangeEvent::ActiveChanged { active: false });
    }

    /// Route one capture-phase input event
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        editor: &mut StyleEditor,
        observers: &ChangeDispatcher,
        event: &InputEvent,
    ) -> EventDisposition {
        if !self.active {
            return EventDisposition::Pass;
        }
        match event {
            InputEvent::PointerMove(pointer) => self.on_pointer_move(doc, observers, pointer),
            InputEvent::Click(pointer) => self.on_click(doc, editor, observers, pointer),
            InputEvent::KeyDown(key) => self.on_key_down(doc, editor, observers, key),
        }
    }

    fn on_pointer_move(
        &mut self,
        doc: &Document,
        observers: &ChangeDispatcher,
        pointer: &PointerEvent,
    ) -> EventDisposition {
        if !self.hover_mode || doc.tool_surface_at(pointer.x, pointer.y) {
            return EventDisposition::Pass;
        }
        let hit = doc.element_from_point(pointer.x, pointer.y);
        if hit != self.hovered {
            self.hovered = hit;
            if self.selected.is_none() {
                observers.emit(&ChangeEvent::HoverChanged { element: hit });
            }
        }
        EventDisposition::Pass
    }

    fn on_click(
        &mut self,
        doc: &mut Document,
        editor: &mut StyleEditor,
        observers: &ChangeDispatcher,
        pointer: &PointerEvent,
    ) -> EventDisposition {
        if doc.tool_surface_at(pointer.x, pointer.y) {
            return EventDisposition::Pass;
        }
        if let Some(hit) = doc.element_from_point(pointer.x, pointer.y) {
            self.select(doc, editor, observers, hit);
        }
        // Swallow the click even when nothing was hit, so the page does
        // not react to picker interaction
        EventDisposition::Consume
    }

    fn on_key_down(
        &mut self,
        doc: &mut Document,
        editor: &mut StyleEditor,
        observers: &ChangeDispatcher,
        key: &KeyEvent,
    ) -> EventDisposition {
        if key.key == KeyCode::ESCAPE {
            if self.selected.is_some() {
                self.deselect(observers);
            } else {
                self.deactivate(observers);
            }
            return EventDisposition::Consume;
        }
        let selected = match self.selected {
            Some(selected) => selected,
            None => return EventDisposition::Pass,
        };
        if self.keyboard_shortcuts && key.key == KeyCode::Z && key.modifiers.command() {
            if key.modifiers.shift() {
                editor.redo(doc, observers);
            } else {
                editor.undo(doc, observers);
            }
            return EventDisposition::Consume;
        }
        let target = match key.key {
            KeyCode::UP => doc
                .parent(selected)
                .filter(|&parent| parent != doc.root()),
            KeyCode::DOWN => doc.first_child(selected),
            KeyCode::LEFT => doc.previous_sibling(selected),
            KeyCode::RIGHT => doc.next_sibling(selected),
            _ => return EventDisposition::Pass,
        };
        if let Some(target) = target {
            self.select(doc, editor, observers, target);
        }
        // Arrow keys are consumed at structural boundaries too; the page
        // must not scroll under the picker
        EventDisposition::Consume
    }

    /// Run the full select transition; re-selecting the current element is
    /// a no-op
    pub fn select(
        &mut self,
        doc: &Document,
        editor: &mut StyleEditor,
        observers: &ChangeDispatcher,
        element: ElementId,
    ) {
        if self.selected == Some(element) {
            return;
        }
        self.selected = Some(element);
        self.hover_mode = false;
        editor.activate(doc, element);
        debug!(selector = %doc.selector_label(element), "selected element");
        observers.emit(&ChangeEvent::SelectionChanged {
            element: Some(element),
        });
    }

    /// Return to hover mode
    pub fn deselect(&mut self, observers: &ChangeDispatcher) {
        if self.selected.take().is_none() {
            return;
        }
        self.hovered = None;
        self.hover_mode = true;
        observers.emit(&ChangeEvent::SelectionChanged { element: None });
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
