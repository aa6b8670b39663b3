//! Numeric value handling and editor heuristics
//!
//! Extracts the leading numeric token from a CSS value so keyboard nudges
//! and sliders can step it while preserving the unit verbatim, and maps
//! property names to the editor affordances the external panel renders.
//! The slider bounds are name heuristics, not invariants; nothing stops a
//! value from leaving the range through direct input.

use std::sync::OnceLock;

use regex::Regex;
use restyle_dom::common_values;

static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();

fn numeric_re() -> &'static Regex {
    NUMERIC_RE.get_or_init(|| Regex::new(r"^(-?\d*\.?\d+)(.*)$").expect("Invalid regex pattern"))
}

/// A CSS value split into its leading number and trailing unit
#[derive(Clone, Debug, PartialEq)]
pub struct NumericValue {
    pub number: f64,
    /// Everything after the numeric token, re-appended unchanged
    pub unit: String,
}

impl NumericValue {
    /// Parse the leading numeric token; `None` when the value does not
    /// start with one (keywords, colors, `auto`, ...)
    pub fn parse(value: &str) -> Option<Self> {
        let captures = numeric_re().captures(value.trim())?;
        let number: f64 = captures.get(1)?.as_str().parse().ok()?;
        Some(Self {
            number,
            unit: captures.get(2).map_or(String::new(), |m| m.as_str().to_string()),
        })
    }

    /// Re-concatenate a stepped number with the original unit
    pub fn with_number(&self, number: f64) -> String {
        format!("{}{}", number, self.unit)
    }
}

/// Inclusive slider bounds for a numeric property
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Slider bounds by property-name heuristic
///
/// Substring matches, in priority order; the fallback range applies when a
/// value has no parseable number at all (the slider then starts at 0).
pub fn slider_range(property: &str) -> SliderRange {
    if property.contains("opacity") || property.contains("alpha") {
        SliderRange {
            min: 0.0,
            max: 1.0,
            step: 0.01,
        }
    } else if property.contains("font-size") {
        SliderRange {
            min: 8.0,
            max: 72.0,
            step: 1.0,
        }
    } else if property.contains("width") || property.contains("height") {
        SliderRange {
            min: 0.0,
            max: 1000.0,
            step: 1.0,
        }
    } else {
        SliderRange {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

/// Editor affordance the external panel should render for a property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorKind {
    /// Enumerated keywords
    Dropdown(&'static [&'static str]),
    /// Color swatch + picker
    Color,
    /// Numeric slider over the heuristic range
    Slider(SliderRange),
    /// Freeform text input
    Text,
}

/// Pick an editor for a property given its current value
pub fn editor_kind(property: &str, current_value: &str) -> EditorKind {
    if let Some(values) = common_values(property) {
        return EditorKind::Dropdown(values);
    }
    if property.contains("color") || property == "background" {
        return EditorKind::Color;
    }
    let numeric = NumericValue::parse(current_value).is_some();
    if numeric
        && (property.contains("size")
            || property.contains("width")
            || property.contains("height")
            || property.contains("opacity"))
    {
        return EditorKind::Slider(slider_range(property));
    }
    EditorKind::Text
}
