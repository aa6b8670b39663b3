//! Restyle Document Model
//!
//! The host-side document abstraction the live-edit engine operates on:
//!
//! - **Element tree**: a slotmap-keyed node arena with traversal,
//!   attachment tracking, hit-testing, and selector derivation. Keys are
//!   generational, so a reference to a removed element can never alias a
//!   newly created one.
//! - **Inline styles**: ordered per-element declaration maps mirroring
//!   `element.style`, plus a computed-style facility that layers inline
//!   declarations over authored styles and initial values.
//! - **Value engine**: a permissive scalar grammar that decides whether a
//!   value survives assignment for a given property, the way a live style
//!   engine drops declarations it cannot parse. Color conversion helpers
//!   for the external color editor live here too.
//!
//! The editing core (`restyle_edit`) holds only [`ElementId`]s and derived
//! metadata; this crate owns the nodes.

pub mod metrics;
pub mod style;
pub mod tree;
pub mod value;

pub use metrics::{box_metrics, BoxMetrics, Edges};
pub use style::InlineStyle;
pub use tree::{Document, ElementId, ElementNode, Rect};
pub use value::{common_values, is_css_wide_keyword, normalize, PropertyKind};
