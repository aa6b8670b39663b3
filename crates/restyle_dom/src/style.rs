//! Inline styles and computed-style resolution
//!
//! [`InlineStyle`] mirrors an element's `style` attribute: an ordered map
//! of declarations where setting an existing property updates it in place
//! and setting an empty value removes it. Declaration order is contractual;
//! CSS text export replays it verbatim.
//!
//! Computed styles layer three sources: the initial-value table for the
//! supported property set, the element's authored base styles (the stand-in
//! for whatever cascade the host resolved), then inline declarations.
//! Inheritance is the host's concern; authored base styles approximate it.

use indexmap::IndexMap;

use crate::tree::{Document, ElementId};

/// Initial values for the supported property set
///
/// The subset the panel actually surfaces, with CSS-correct initials.
const INITIAL_VALUES: &[(&str, &str)] = &[
    ("display", "inline"),
    ("position", "static"),
    ("width", "auto"),
    ("height", "auto"),
    ("color", "rgb(0, 0, 0)"),
    ("background-color", "rgba(0, 0, 0, 0)"),
    ("font-size", "16px"),
    ("font-family", "sans-serif"),
    ("font-weight", "400"),
    ("line-height", "normal"),
    ("text-align", "left"),
    ("text-transform", "none"),
    ("margin-top", "0px"),
    ("margin-right", "0px"),
    ("margin-bottom", "0px"),
    ("margin-left", "0px"),
    ("padding-top", "0px"),
    ("padding-right", "0px"),
    ("padding-bottom", "0px"),
    ("padding-left", "0px"),
    ("border-top-width", "0px"),
    ("border-right-width", "0px"),
    ("border-bottom-width", "0px"),
    ("border-left-width", "0px"),
    ("border-radius", "0px"),
    ("opacity", "1"),
    ("z-index", "auto"),
    ("overflow", "visible"),
    ("cursor", "auto"),
    ("flex-direction", "row"),
    ("justify-content", "normal"),
    ("align-items", "normal"),
];

/// Ordered inline declarations for one element
#[derive(Clone, Debug, Default)]
pub struct InlineStyle {
    decls: IndexMap<String, String>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration; an empty value removes it, like
    /// `style.setProperty(prop, "")`
    pub fn set_property(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.remove_property(property);
        } else {
            self.decls.insert(property.to_string(), value.to_string());
        }
    }

    /// Remove a declaration, returning the prior value if there was one
    pub fn remove_property(&mut self, property: &str) -> Option<String> {
        self.decls.shift_remove(property)
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls.get(property).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drop every declaration, like `style.cssText = ""`
    pub fn clear(&mut self) {
        self.decls.clear();
    }
}

impl Document {
    // ---------------------------------------------------------------------
    // Inline style access
    // ---------------------------------------------------------------------

    pub fn inline_style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.get(id).map(|node| &node.inline)
    }

    pub fn inline_value(&self, id: ElementId, property: &str) -> Option<&str> {
        self.get(id).and_then(|node| node.inline.get(property))
    }

    /// Write an inline declaration; an empty value removes it
    pub fn set_inline_property(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(node) = self.get_mut(id) {
            node.inline.set_property(property, value);
        }
    }

    pub fn remove_inline_property(&mut self, id: ElementId, property: &str) -> Option<String> {
        self.get_mut(id)
            .and_then(|node| node.inline.remove_property(property))
    }

    /// Clear every inline declaration in one step
    pub fn clear_inline(&mut self, id: ElementId) {
        if let Some(node) = self.get_mut(id) {
            node.inline.clear();
        }
    }

    // ---------------------------------------------------------------------
    // Computed styles
    // ---------------------------------------------------------------------

    /// The full computed set for an element: initial values overlaid with
    /// authored base styles, overlaid with inline declarations
    pub fn computed_style(&self, id: ElementId) -> IndexMap<String, String> {
        let mut computed: IndexMap<String, String> = INITIAL_VALUES
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(node) = self.get(id) {
            for (property, value) in &node.base {
                computed.insert(property.clone(), value.clone());
            }
            for (property, value) in node.inline.iter() {
                computed.insert(property.to_string(), value.to_string());
            }
        }
        computed
    }

    /// Single-property view of [`Document::computed_style`]
    pub fn computed_value(&self, id: ElementId, property: &str) -> Option<String> {
        let node = self.get(id)?;
        if let Some(value) = node.inline.get(property) {
            return Some(value.to_string());
        }
        if let Some(value) = node.base.get(property) {
            return Some(value.clone());
        }
        INITIAL_VALUES
            .iter()
            .find(|&&(k, _)| k == property)
            .map(|&(_, v)| v.to_string())
    }
}
