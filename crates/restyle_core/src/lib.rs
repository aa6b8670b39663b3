//! Restyle Core
//!
//! Foundational primitives shared by the Restyle live-edit engine:
//!
//! - **Input events**: platform-agnostic pointer and keyboard events with
//!   modifier handling, delivered by the host in capture order
//! - **Preferences**: tolerant TOML-backed configuration with documented
//!   defaults
//!
//! The engine itself (history, style editing, selection) lives in
//! `restyle_edit`; the host document model lives in `restyle_dom`. This
//! crate stays dependency-light so both can build on it.

pub mod events;
pub mod prefs;

pub use events::{EventDisposition, InputEvent, KeyCode, KeyEvent, Modifiers, PointerEvent};
pub use prefs::{Preferences, PrefsError};
