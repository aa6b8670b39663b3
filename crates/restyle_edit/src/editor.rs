//! Live style editing
//!
//! Applies and reverts single CSS property changes on a target element,
//! validates values through the document's value engine, and records every
//! successful mutation into the history log. Holds one computed-style
//! snapshot per activated element so a toggled-off property can come back
//! at its pre-edit value instead of an empty string.
//!
//! All failure modes are recoverable and surface as `false`/`None`/`0`
//! returns: invalid values, detached elements and missing snapshots never
//! raise.

use rustc_hash::FxHashMap;

use restyle_dom::{value, Document, ElementId};
use tracing::{debug, warn};

use crate::history::{ChangeRecord, HistoryStore};
use crate::notify::{ChangeDispatcher, ChangeEvent, HistoryAction};
use crate::value::NumericValue;

/// Ordered subset of computed properties the panel header summarizes
const SUMMARY_PROPERTIES: &[&str] = &[
    "display",
    "position",
    "width",
    "height",
    "color",
    "background-color",
    "font-size",
    "font-family",
    "font-weight",
    "line-height",
    "text-align",
    "border-radius",
    "opacity",
    "z-index",
];

/// Applies property edits and keeps per-element style snapshots
pub struct StyleEditor {
    history: HistoryStore,
    snapshots: FxHashMap<ElementId, FxHashMap<String, String>>,
}

impl StyleEditor {
    pub fn new() -> Self {
        Self {
            history: HistoryStore::new(),
            snapshots: FxHashMap::default(),
        }
    }

    pub fn with_history_limit(max_entries: usize) -> Self {
        Self {
            history: HistoryStore::with_limit(max_entries),
            snapshots: FxHashMap::default(),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Capture the element's full computed set if not already captured
    ///
    /// Idempotent; the first activation wins so later edits never pollute
    /// the restore values.
    pub fn activate(&mut self, doc: &Document, element: ElementId) {
        if self.snapshots.contains_key(&element) {
            return;
        }
        let snapshot: FxHashMap<String, String> =
            doc.computed_style(element).into_iter().collect();
        debug!(properties = snapshot.len(), "captured style snapshot");
        self.snapshots.insert(element, snapshot);
    }

    /// Validate and apply one property value as an inline style
    ///
    /// Returns `false` (leaving the element untouched) when the value does
    /// not survive the value engine or the element has left the document.
    pub fn set_property(
        &mut self,
        doc: &mut Document,
        observers: &ChangeDispatcher,
        element: ElementId,
        property: &str,
        value: &str,
        record_history: bool,
    ) -> bool {
        if !doc.is_connected(element) {
            debug!(property, "skipped edit of detached element");
            return false;
        }
        let normalized = match value::normalize(property, value) {
            Some(normalized) => normalized,
            None => {
                warn!(property, value, "invalid CSS value");
                return false;
            }
        };
        let old_value = self.effective_value(doc, element, property);
        doc.set_inline_property(element, property, &normalized);
        if record_history {
            self.history
                .record(doc, element, property, &old_value, &normalized);
        }
        observers.emit(&ChangeEvent::PropertyChanged {
            element,
            property: property.to_string(),
            old_value,
            new_value: normalized,
        });
        true
    }

    /// Step the property's leading number by `delta` (×10 when `coarse`),
    /// preserving the unit
    pub fn adjust_numeric(
        &mut self,
        doc: &mut Document,
        observers: &ChangeDispatcher,
        element: ElementId,
        property: &str,
        delta: f64,
        coarse: bool,
    ) -> bool {
        let current = self.effective_value(doc, element, property);
        let parsed = match NumericValue::parse(&current) {
            Some(parsed) => parsed,
            None => return false,
        };
        let delta = if coarse { delta * 10.0 } else { delta };
        let next = parsed.with_number(parsed.number + delta);
        self.set_property(doc, observers, element, property, &next, true)
    }

    /// Toggle a property off (when inline) or back on from the snapshot
    ///
    /// Returns the property's new state: `false` after removal, `true`
    /// after a successful restore.
    pub fn toggle_property(
        &mut self,
        doc: &mut Document,
        observers: &ChangeDispatcher,
        element: ElementId,
        property: &str,
    ) -> bool {
        if doc.inline_value(element, property).is_some() {
            self.remove_property(doc, observers, element, property, true);
            return false;
        }
        let restored = self
            .snapshots
            .get(&element)
            .and_then(|snapshot| snapshot.get(property).cloned())
            .or_else(|| doc.computed_value(element, property));
        match restored {
            Some(value) => self.set_property(doc, observers, element, property, &value, true),
            None => false,
        }
    }

    /// Clear a property's inline value; a removal of an already-unset
    /// property still succeeds
    pub fn remove_property(
        &mut self,
        doc: &mut Document,
        observers: &ChangeDispatcher,
        element: ElementId,
        property: &str,
        record_history: bool,
    ) -> bool {
        if !doc.is_connected(element) {
            debug!(property, "skipped removal on detached element");
            return false;
        }
        let old_value = self.effective_value(doc, element, property);
        doc.remove_inline_property(element, property);
        if record_history {
            self.history.record(doc, element, property, &old_value, "");
        }
        observers.emit(&ChangeEvent::PropertyChanged {
            element,
            property: property.to_string(),
            old_value,
            new_value: String::new(),
        });
        true
    }

    /// Roll an element back to its pre-edit state
    ///
    /// Clears all inline styles in one step, purges the element's history
    /// records and snapshot, and reports how many records were removed.
    pub fn reset_element(
        &mut self,
        doc: &mut Document,
        observers: &ChangeDispatcher,
        element: ElementId,
    ) -> usize {
        if doc.is_connected(element) {
            doc.clear_inline(element);
        }
        let changes_count = self.history.reset_element(doc, element);
        self.snapshots.remove(&element);
        observers.emit(&ChangeEvent::ElementReset {
            element,
            changes_count,
        });
        changes_count
    }

    /// Undo the newest applied edit
    pub fn undo(&mut self, doc: &mut Document, observers: &ChangeDispatcher) -> Option<ChangeRecord> {
        let record = self.history.undo(doc)?;
        observers.emit(&ChangeEvent::History {
            action: HistoryAction::Undo,
            record: record.clone(),
        });
        Some(record)
    }

    /// Redo the newest undone edit
    pub fn redo(&mut self, doc: &mut Document, observers: &ChangeDispatcher) -> Option<ChangeRecord> {
        let record = self.history.redo(doc)?;
        observers.emit(&ChangeEvent::History {
            action: HistoryAction::Redo,
            record: record.clone(),
        });
        Some(record)
    }

    /// Inline declarations as `(property, value)` pairs, declaration order
    pub fn modified_properties(&self, doc: &Document, element: ElementId) -> Vec<(String, String)> {
        doc.inline_style(element)
            .map(|style| {
                style
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Serialize the element's inline declarations for "copy as CSS"
    ///
    /// One `property: value;` pair per line, declaration order.
    pub fn css_text(&self, doc: &Document, element: ElementId) -> String {
        self.modified_properties(doc, element)
            .iter()
            .map(|(property, value)| format!("  {property}: {value};"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Computed values for the panel's summary section, fixed order
    pub fn style_summary(&self, doc: &Document, element: ElementId) -> Vec<(String, String)> {
        SUMMARY_PROPERTIES
            .iter()
            .filter_map(|&property| {
                doc.computed_value(element, property)
                    .map(|value| (property.to_string(), value))
            })
            .collect()
    }

    /// Pre-mutation effective value: inline if set, else computed
    fn effective_value(&self, doc: &Document, element: ElementId, property: &str) -> String {
        doc.inline_value(element, property)
            .map(str::to_string)
            .or_else(|| doc.computed_value(element, property))
            .unwrap_or_default()
    }

    /// Drop all per-element state; session teardown
    pub fn clear(&mut self) {
        self.history.clear();
        self.snapshots.clear();
    }
}

impl Default for StyleEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup() -> (Document, ElementId, StyleEditor, ChangeDispatcher) {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        let root = doc.root();
        doc.append_child(root, el);
        (doc, el, StyleEditor::new(), ChangeDispatcher::new())
    }

    #[test]
    fn test_set_property_records_and_applies() {
        let (mut doc, el, mut editor, observers) = setup();
        editor.activate(&doc, el);

        assert!(editor.set_property(&mut doc, &observers, el, "opacity", "0.5", true));
        assert_eq!(doc.inline_value(el, "opacity"), Some("0.5"));

        let stats = editor.history().stats();
        assert_eq!(stats.total, 1);
        let record = editor.history().records_for(el).next().unwrap();
        assert_eq!(record.property, "opacity");
        assert_eq!(record.old_value, "1");
        assert_eq!(record.new_value, "0.5");
    }

    #[test]
    fn test_invalid_value_leaves_element_untouched() {
        let (mut doc, el, mut editor, observers) = setup();
        assert!(!editor.set_property(&mut doc, &observers, el, "color", "not-a-color-xyz", true));
        assert_eq!(doc.inline_value(el, "color"), None);
        assert_eq!(editor.history().stats().total, 0);
    }

    #[test]
    fn test_set_property_skips_detached_elements() {
        let (mut doc, el, mut editor, observers) = setup();
        doc.detach(el);
        assert!(!editor.set_property(&mut doc, &observers, el, "opacity", "0.5", true));
        assert_eq!(doc.inline_value(el, "opacity"), None);
    }

    #[test]
    fn test_adjust_numeric_steps_and_preserves_unit() {
        let (mut doc, el, mut editor, observers) = setup();
        doc.set_inline_property(el, "width", "10px");

        assert!(editor.adjust_numeric(&mut doc, &observers, el, "width", 1.0, false));
        assert_eq!(doc.inline_value(el, "width"), Some("11px"));

        // Re-read picks up the new inline value; coarse multiplies by 10
        doc.set_inline_property(el, "width", "10px");
        assert!(editor.adjust_numeric(&mut doc, &observers, el, "width", 1.0, true));
        assert_eq!(doc.inline_value(el, "width"), Some("20px"));
    }

    #[test]
    fn test_adjust_numeric_fails_on_non_numeric() {
        let (mut doc, el, mut editor, observers) = setup();
        doc.set_inline_property(el, "width", "auto");
        assert!(!editor.adjust_numeric(&mut doc, &observers, el, "width", 1.0, false));
        assert_eq!(doc.inline_value(el, "width"), Some("auto"));
    }

    #[test]
    fn test_toggle_restores_snapshot_value_then_removes() {
        let (mut doc, el, mut editor, observers) = setup();
        doc.set_base_style(el, "font-size", "18px");
        editor.activate(&doc, el);

        // Not inline: toggling on restores the snapshot value
        assert!(editor.toggle_property(&mut doc, &observers, el, "font-size"));
        assert_eq!(doc.inline_value(el, "font-size"), Some("18px"));

        // Inline now: toggling off removes it again
        assert!(!editor.toggle_property(&mut doc, &observers, el, "font-size"));
        assert_eq!(doc.inline_value(el, "font-size"), None);
    }

    #[test]
    fn test_toggle_snapshot_survives_later_edits() {
        let (mut doc, el, mut editor, observers) = setup();
        doc.set_base_style(el, "font-size", "18px");
        editor.activate(&doc, el);

        editor.set_property(&mut doc, &observers, el, "font-size", "30px", true);
        editor.remove_property(&mut doc, &observers, el, "font-size", true);

        // Restore uses the activation-time value, not the last edit
        assert!(editor.toggle_property(&mut doc, &observers, el, "font-size"));
        assert_eq!(doc.inline_value(el, "font-size"), Some("18px"));
    }

    #[test]
    fn test_remove_property_always_succeeds() {
        let (mut doc, el, mut editor, observers) = setup();
        assert!(editor.remove_property(&mut doc, &observers, el, "opacity", true));
        let record = editor.history().records_for(el).next().unwrap();
        assert_eq!(record.new_value, "");
        // Old value fell back to the computed value
        assert_eq!(record.old_value, "1");
    }

    #[test]
    fn test_reset_element_reports_removed_count() {
        let (mut doc, el, mut editor, observers) = setup();
        editor.activate(&doc, el);
        editor.set_property(&mut doc, &observers, el, "opacity", "0.5", true);
        editor.set_property(&mut doc, &observers, el, "width", "10px", true);
        editor.set_property(&mut doc, &observers, el, "color", "red", true);

        assert_eq!(editor.reset_element(&mut doc, &observers, el), 3);
        assert!(doc.inline_style(el).unwrap().is_empty());
        assert_eq!(editor.history().stats().total, 0);

        // Snapshot is gone; the next activation recaptures
        editor.activate(&doc, el);
        assert_eq!(editor.reset_element(&mut doc, &observers, el), 0);
    }

    #[test]
    fn test_undo_emits_matching_notification() {
        let (mut doc, el, mut editor, _) = setup();
        use std::cell::RefCell;
        use std::rc::Rc;
        let events: Rc<RefCell<Vec<ChangeEvent>>> = Rc::default();
        let mut observers = ChangeDispatcher::new();
        {
            let events = Rc::clone(&events);
            observers.register(move |event| events.borrow_mut().push(event.clone()));
        }

        editor.activate(&doc, el);
        editor.set_property(&mut doc, &observers, el, "opacity", "0.5", true);
        let record = editor.undo(&mut doc, &observers).unwrap();
        assert_eq!(record.property, "opacity");
        assert_eq!(doc.inline_value(el, "opacity"), Some("1"));

        let events = events.borrow();
        assert!(matches!(
            events.last(),
            Some(ChangeEvent::History {
                action: HistoryAction::Undo,
                ..
            })
        ));
    }

    #[test]
    fn test_css_text_serializes_declaration_order() {
        let (mut doc, el, mut editor, observers) = setup();
        editor.set_property(&mut doc, &observers, el, "color", "red", true);
        editor.set_property(&mut doc, &observers, el, "margin-top", "4px", true);
        assert_eq!(
            editor.css_text(&doc, el),
            "  color: red;\n  margin-top: 4px;"
        );
        assert_eq!(editor.css_text(&doc, doc.root()), "");
    }

    #[test]
    fn test_style_summary_fixed_order() {
        let (mut doc, el, mut editor, observers) = setup();
        editor.set_property(&mut doc, &observers, el, "opacity", "0.25", true);
        let summary = editor.style_summary(&doc, el);
        let keys: Vec<&str> = summary.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys.first(), Some(&"display"));
        assert!(summary
            .iter()
            .any(|(k, v)| k == "opacity" && v == "0.25"));
    }
}
