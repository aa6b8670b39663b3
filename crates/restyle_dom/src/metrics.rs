//! Box model metrics
//!
//! Resolves an element's margin/border/padding readout from its layout rect
//! and computed styles, for the external highlighter's box-model overlays.

use crate::tree::{Document, ElementId};

/// Per-side pixel values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Box model readout for one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMetrics {
    pub width: f32,
    pub height: f32,
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
}

/// Resolve box metrics for an element; `None` when the key is dead
pub fn box_metrics(doc: &Document, id: ElementId) -> Option<BoxMetrics> {
    let bounds = doc.get(id)?.bounds();
    Some(BoxMetrics {
        width: bounds.width,
        height: bounds.height,
        margin: edges(doc, id, "margin"),
        padding: edges(doc, id, "padding"),
        border: border_edges(doc, id),
    })
}

fn edges(doc: &Document, id: ElementId, prefix: &str) -> Edges {
    Edges {
        top: px(doc, id, &format!("{prefix}-top")),
        right: px(doc, id, &format!("{prefix}-right")),
        bottom: px(doc, id, &format!("{prefix}-bottom")),
        left: px(doc, id, &format!("{prefix}-left")),
    }
}

fn border_edges(doc: &Document, id: ElementId) -> Edges {
    Edges {
        top: px(doc, id, "border-top-width"),
        right: px(doc, id, "border-right-width"),
        bottom: px(doc, id, "border-bottom-width"),
        left: px(doc, id, "border-left-width"),
    }
}

/// Leading float of a computed value, `0.0` when absent or non-numeric
fn px(doc: &Document, id: ElementId, property: &str) -> f32 {
    let value = match doc.computed_value(id, property) {
        Some(value) => value,
        None => return 0.0,
    };
    let numeric: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    numeric.parse().unwrap_or(0.0)
}
