//! Undo/redo history
//!
//! A bounded, linear log of property edits keyed by element identity. The
//! cursor is stored as an applied-count (`0..=len`): records below it are
//! applied, records at or above it are redoable. Appending truncates the
//! redoable tail and re-derives the cursor from the new length, so eviction
//! can never leave it pointing at a shifted slot.
//!
//! History bookkeeping is independent of whether the visual effect could be
//! applied: undo/redo move the cursor even when the target element has left
//! the document, so state never gets stuck on stale references.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use restyle_dom::{Document, ElementId};
use tracing::debug;

/// Default cap on retained records
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// One recorded property edit
///
/// Immutable once created; removal edits carry an empty `new_value`. The
/// selector is derived display metadata; identity comparisons always use
/// `element`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord {
    pub element: ElementId,
    pub selector: String,
    pub property: String,
    pub old_value: String,
    pub new_value: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// Pure read view of the log
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    /// Index of the newest applied record, `-1` when none are applied
    pub current_index: isize,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Bounded linear undo/redo log
pub struct HistoryStore {
    entries: VecDeque<ChangeRecord>,
    /// Count of applied records; invariant `applied <= entries.len()`
    applied: usize,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_HISTORY)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            applied: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Append an edit, discarding the redoable tail and evicting the oldest
    /// record when over the cap
    ///
    /// Degenerate edits (old equals new) are still recorded; callers decide
    /// whether to suppress them. Never fails.
    pub fn record(
        &mut self,
        doc: &Document,
        element: ElementId,
        property: &str,
        old_value: &str,
        new_value: &str,
    ) {
        self.entries.truncate(self.applied);
        self.entries.push_back(ChangeRecord {
            element,
            selector: doc.selector_label(element),
            property: property.to_string(),
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
            timestamp: now_millis(),
        });
        if self.entries.len() > self.max_entries {
            self.entries.pop_front();
            debug!(max = self.max_entries, "evicted oldest history record");
        }
        // Cursor is re-derived from the length, not incrementally
        // maintained; eviction and cursor-advance can never combine into
        // an off-by-one.
        self.applied = self.entries.len();
    }

    /// Step back one record, reapplying its old value when the element is
    /// still attached
    pub fn undo(&mut self, doc: &mut Document) -> Option<ChangeRecord> {
        if !self.can_undo() {
            return None;
        }
        self.applied -= 1;
        let record = self.entries[self.applied].clone();
        self.apply(doc, record.element, &record.property, &record.old_value);
        Some(record)
    }

    /// Step forward one record, reapplying its new value when the element
    /// is still attached
    pub fn redo(&mut self, doc: &mut Document) -> Option<ChangeRecord> {
        if !self.can_redo() {
            return None;
        }
        let record = self.entries[self.applied].clone();
        self.applied += 1;
        self.apply(doc, record.element, &record.property, &record.new_value);
        Some(record)
    }

    fn apply(&self, doc: &mut Document, element: ElementId, property: &str, value: &str) {
        if doc.is_connected(element) {
            doc.set_inline_property(element, property, value);
        } else {
            debug!(property, "skipped style write to detached element");
        }
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    /// Purge every record for one element, clearing the affected properties
    /// on the live element; returns the number of records removed
    pub fn reset_element(&mut self, doc: &mut Document, element: ElementId) -> usize {
        let removed: Vec<ChangeRecord> = self
            .entries
            .iter()
            .filter(|r| r.element == element)
            .cloned()
            .collect();
        for record in &removed {
            self.apply(doc, element, &record.property, "");
        }
        self.entries.retain(|r| r.element != element);
        self.applied = self.entries.len();
        removed.len()
    }

    /// Records touching one element, oldest first
    pub fn records_for(&self, element: ElementId) -> impl Iterator<Item = &ChangeRecord> {
        self.entries.iter().filter(move |r| r.element == element)
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            total: self.entries.len(),
            current_index: self.applied as isize - 1,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Drop everything; session teardown
    pub fn clear(&mut self) {
        self.entries.clear();
        self.applied = 0;
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
