//! Document tree management
//!
//! A slotmap-backed element arena standing in for the hosting page's DOM.
//! The editing core never owns nodes; it holds [`ElementId`]s, and every
//! lookup here tolerates detached subtrees and dead keys by returning
//! `Option`/empty rather than failing.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::warn;

use crate::style::InlineStyle;

new_key_type! {
    /// Stable, generational identity for an element in a [`Document`]
    pub struct ElementId;
}

/// Axis-aligned layout rectangle in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A single element in the document
#[derive(Debug, Default)]
pub struct ElementNode {
    pub tag: String,
    pub id_attr: Option<String>,
    pub classes: Vec<String>,
    parent: Option<ElementId>,
    children: SmallVec<[ElementId; 8]>,
    pub(crate) inline: InlineStyle,
    /// Authored styles, standing in for what the host's cascade would
    /// resolve for this element before any inline edits
    pub(crate) base: FxHashMap<String, String>,
    bounds: Rect,
    tool_surface: bool,
}

impl ElementNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_tool_surface(&self) -> bool {
        self.tool_surface
    }
}

/// The host document: one root plus an arena of elements
pub struct Document {
    nodes: SlotMap<ElementId, ElementNode>,
    root: ElementId,
}

impl Document {
    /// Create a document with an empty root element
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode::new("html"));
        Self { nodes, root }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element; attach it with [`Document::append_child`]
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(ElementNode::new(tag))
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        self.nodes.get_mut(id)
    }

    /// Append `child` as the last child of `parent`
    ///
    /// Reparents if the child is already attached elsewhere. Appending an
    /// element into its own subtree is rejected.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        if child == parent || self.is_ancestor(child, parent) {
            warn!("rejected append that would create a cycle");
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Unlink an element (and implicitly its subtree) from the document
    ///
    /// The nodes stay alive, mirroring a DOM removal where scripts still
    /// hold references; they just stop being connected.
    pub fn detach(&mut self, id: ElementId) {
        if id == self.root {
            return;
        }
        let parent = match self.nodes.get(id) {
            Some(node) => node.parent,
            None => return,
        };
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|c| *c != id);
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }

    /// Delete an element and its whole subtree from the arena
    ///
    /// Afterwards the keys no longer resolve at all, the harsher of the two
    /// staleness modes callers must tolerate.
    pub fn remove_subtree(&mut self, id: ElementId) {
        if id == self.root {
            return;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
            }
        }
    }

    /// Whether the element's ancestor chain reaches the document root
    pub fn is_connected(&self, id: ElementId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        false
    }

    // ---------------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------------

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.nodes.get(id) {
            Some(node) => node.children.as_slice(),
            None => &[],
        }
    }

    pub fn first_child(&self, id: ElementId) -> Option<ElementId> {
        self.children(id).first().copied()
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        index.checked_sub(1).and_then(|i| siblings.get(i)).copied()
    }

    // ---------------------------------------------------------------------
    // Attributes and geometry
    // ---------------------------------------------------------------------

    pub fn set_id_attr(&mut self, id: ElementId, value: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.id_attr = Some(value.to_string());
        }
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes.push(class.to_string());
        }
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = bounds;
        }
    }

    /// Mark an element as part of the tool's own UI overlay
    ///
    /// Tool surfaces (and their subtrees) are invisible to page hit-testing,
    /// the equivalent of suspending their pointer interaction while
    /// resolving the element under the cursor.
    pub fn set_tool_surface(&mut self, id: ElementId, tool_surface: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.tool_surface = tool_surface;
        }
    }

    /// Seed an authored style, standing in for the host's cascade
    pub fn set_base_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.base.insert(property.to_string(), value.to_string());
        }
    }

    // ---------------------------------------------------------------------
    // Hit testing
    // ---------------------------------------------------------------------

    /// Topmost page element under the point, excluding tool surfaces
    pub fn element_from_point(&self, x: f32, y: f32) -> Option<ElementId> {
        self.hit_test(self.root, x, y, false)
    }

    /// Whether the topmost element under the point belongs to the tool's UI
    pub fn tool_surface_at(&self, x: f32, y: f32) -> bool {
        self.hit_test(self.root, x, y, true)
            .and_then(|id| self.nodes.get(id))
            .map(|node| node.tool_surface)
            .unwrap_or(false)
    }

    /// Depth-first scan in tree order; a later or deeper hit wins, which
    /// matches paint order for the non-overlapping layouts hosts hand us.
    fn hit_test(
        &self,
        id: ElementId,
        x: f32,
        y: f32,
        include_tool_surfaces: bool,
    ) -> Option<ElementId> {
        let node = self.nodes.get(id)?;
        if node.tool_surface && !include_tool_surfaces {
            return None;
        }
        let mut best = None;
        if id != self.root && node.bounds.contains(x, y) {
            best = Some(id);
        }
        for &child in &node.children {
            if let Some(hit) = self.hit_test(child, x, y, include_tool_surfaces) {
                best = Some(hit);
            }
        }
        best
    }

    // ---------------------------------------------------------------------
    // Selector derivation
    // ---------------------------------------------------------------------

    /// Derive a human-readable selector for an element
    ///
    /// `#id` when the element has one, `tag.classes` when it has classes,
    /// otherwise the parent's selector chained with `:nth-child`. Purely
    /// informational; element identity is always the key, never this label.
    pub fn selector_label(&self, id: ElementId) -> String {
        let node = match self.nodes.get(id) {
            Some(node) => node,
            None => return String::from("unknown"),
        };
        if let Some(ref id_attr) = node.id_attr {
            return format!("#{id_attr}");
        }
        if !node.classes.is_empty() {
            return format!("{}.{}", node.tag, node.classes.join("."));
        }
        if let Some(parent) = node.parent {
            let index = self
                .children(parent)
                .iter()
                .position(|&c| c == id)
                .map_or(0, |i| i + 1);
            return format!(
                "{} > {}:nth-child({})",
                self.selector_label(parent),
                node.tag,
                index
            );
        }
        node.tag.clone()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_child(tag: &str) -> (Document, ElementId) {
        let mut doc = Document::new();
        let el = doc.create_element(tag);
        let root = doc.root();
        doc.append_child(root, el);
        (doc, el)
    }

    #[test]
    fn test_created_elements_start_detached() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        assert!(!doc.is_connected(el));
        let root = doc.root();
        doc.append_child(root, el);
        assert!(doc.is_connected(el));
    }

    #[test]
    fn test_detach_disconnects_subtree() {
        let (mut doc, parent) = doc_with_child("div");
        let child = doc.create_element("span");
        doc.append_child(parent, child);
        doc.detach(parent);
        assert!(!doc.is_connected(parent));
        assert!(!doc.is_connected(child));
        // Nodes stay resolvable, like a DOM subtree a script still holds
        assert!(doc.get(child).is_some());
        assert_eq!(doc.parent(child), Some(parent));
    }

    #[test]
    fn test_remove_subtree_kills_keys() {
        let (mut doc, parent) = doc_with_child("div");
        let child = doc.create_element("span");
        doc.append_child(parent, child);
        doc.remove_subtree(parent);
        assert!(doc.get(parent).is_none());
        assert!(doc.get(child).is_none());
        assert!(!doc.is_connected(child));
    }

    #[test]
    fn test_cycle_append_is_rejected() {
        let (mut doc, parent) = doc_with_child("div");
        let child = doc.create_element("span");
        doc.append_child(parent, child);
        doc.append_child(child, parent);
        assert_eq!(doc.parent(parent), Some(doc.root()));
    }

    #[test]
    fn test_sibling_traversal() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element("p");
        let b = doc.create_element("p");
        let c = doc.create_element("p");
        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.append_child(root, c);

        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.previous_sibling(c), Some(b));
        assert_eq!(doc.next_sibling(c), None);
        assert_eq!(doc.previous_sibling(a), None);
        assert_eq!(doc.first_child(root), Some(a));
    }

    #[test]
    fn test_selector_label_prefers_id_then_classes() {
        let (mut doc, el) = doc_with_child("div");
        assert_eq!(doc.selector_label(el), "html > div:nth-child(1)");

        doc.add_class(el, "card");
        doc.add_class(el, "wide");
        assert_eq!(doc.selector_label(el), "div.card.wide");

        doc.set_id_attr(el, "hero");
        assert_eq!(doc.selector_label(el), "#hero");
    }

    #[test]
    fn test_hit_test_topmost_and_overlay_exclusion() {
        let mut doc = Document::new();
        let root = doc.root();
        let below = doc.create_element("div");
        let above = doc.create_element("div");
        let overlay = doc.create_element("div");
        doc.append_child(root, below);
        doc.append_child(root, above);
        doc.append_child(root, overlay);
        doc.set_bounds(below, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_bounds(above, Rect::new(10.0, 10.0, 50.0, 50.0));
        doc.set_bounds(overlay, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_tool_surface(overlay, true);

        // Overlay never hit for page resolution, later sibling wins inside
        assert_eq!(doc.element_from_point(20.0, 20.0), Some(above));
        assert_eq!(doc.element_from_point(80.0, 80.0), Some(below));
        assert_eq!(doc.element_from_point(500.0, 500.0), None);

        // ...but it is what the pointer is actually over
        assert!(doc.tool_surface_at(20.0, 20.0));
        assert!(!doc.tool_surface_at(500.0, 500.0));
    }

    #[test]
    fn test_lookups_tolerate_dead_keys() {
        let (mut doc, el) = doc_with_child("div");
        doc.remove_subtree(el);
        assert!(doc.children(el).is_empty());
        assert_eq!(doc.parent(el), None);
        assert_eq!(doc.selector_label(el), "unknown");
        assert_eq!(doc.element_from_point(0.0, 0.0), None);
    }
}
