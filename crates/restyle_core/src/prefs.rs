//! Preference loading
//!
//! Preferences arrive from an external persistence collaborator as TOML.
//! Any subset of keys may be present; missing keys take the documented
//! defaults, so a brand-new profile and a partially migrated one both load
//! without errors.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors from the preference boundary
#[derive(Error, Debug)]
pub enum PrefsError {
    /// The preference document itself was malformed
    #[error("Malformed preferences: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for preference operations
pub type Result<T> = std::result::Result<T, PrefsError>;

/// User preferences for an editing session
///
/// Loaded once at activation. Runtime changes (e.g. the user toggling hover
/// mode from the panel) go through the session directly and are persisted
/// by the external collaborator, not by this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Highlight elements under the pointer before anything is selected
    pub hover_mode: bool,
    /// Show margin/border/padding overlays around the highlighted element
    pub show_box_model: bool,
    /// Enable Ctrl/Cmd+Z undo and Ctrl/Cmd+Shift+Z redo
    pub keyboard_shortcuts: bool,
    /// Maximum number of retained history records
    pub max_history: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            hover_mode: true,
            show_box_model: true,
            keyboard_shortcuts: true,
            max_history: 50,
        }
    }
}

impl Preferences {
    /// Parse preferences from a TOML document, defaulting absent keys
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let prefs: Preferences = toml::from_str(input)?;
        debug!(?prefs, "loaded preferences");
        Ok(prefs)
    }
}
