//! Restyle Live-Edit Engine
//!
//! The interaction core of the live CSS editor:
//!
//! - **HistoryStore**: a bounded, linear undo/redo log of property edits
//!   keyed by live element identity
//! - **StyleEditor**: validated single-property mutations with per-element
//!   computed-style snapshots for toggling and reset
//! - **SelectionController**: the hover/select state machine driving the
//!   editor from pointer and keyboard input
//! - **EditorSession**: one facade instance per activation wiring the three
//!   together with the change-notification channel
//!
//! Everything runs synchronously inside host-delivered input callbacks.
//! There are no fatal errors here: invalid values, stale element references
//! and structural boundaries all degrade to no-ops signalled through return
//! values.
//!
//! # Example
//!
//! ```
//! use restyle_core::Preferences;
//! use restyle_dom::{Document, Rect};
//! use restyle_edit::EditorSession;
//!
//! let mut doc = Document::new();
//! let div = doc.create_element("div");
//! let root = doc.root();
//! doc.append_child(root, div);
//!
//! let mut session = EditorSession::new(Preferences::default());
//! session.activate();
//! session.select(&mut doc, div);
//! assert!(session.set_property(&mut doc, div, "opacity", "0.5"));
//! assert_eq!(doc.inline_value(div, "opacity"), Some("0.5"));
//! session.undo(&mut doc);
//! ```

pub mod editor;
pub mod history;
pub mod notify;
pub mod selection;
pub mod session;
pub mod value;

pub use editor::StyleEditor;
pub use history::{ChangeRecord, HistoryStats, HistoryStore};
pub use notify::{ChangeDispatcher, ChangeEvent, HistoryAction};
pub use selection::{SelectionController, SelectionState};
pub use session::EditorSession;
pub use value::{editor_kind, slider_range, EditorKind, NumericValue, SliderRange};
