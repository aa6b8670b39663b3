//! Scalar CSS value engine
//!
//! Decides whether a value survives assignment for a given property, the
//! way a live style engine silently drops declarations it cannot parse.
//! The check is deliberately permissive: values are classified per property
//! (color, length, number, keyword set, freeform), CSS-wide keywords pass
//! everywhere, and custom properties accept anything non-empty. This is not
//! a stylesheet parser; it never looks past a single declaration value.
//!
//! Color conversion helpers for the external color editor live at the
//! bottom of the module.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, multispace0, u8 as channel},
    combinator::{all_consuming, opt, recognize, verify},
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};
use tracing::debug;

/// The CSS-wide keywords every property accepts
pub const CSS_WIDE_KEYWORDS: &[&str] = &["initial", "inherit", "unset"];

/// Length units the engine understands
const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "%", "vh", "vw", "vmin", "vmax", "pt", "ch", "ex", "cm", "mm", "in", "pc",
];

const NAMED_COLORS: &[&str] = &[
    "transparent",
    "currentcolor",
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "purple",
    "pink",
    "brown",
    "gray",
    "grey",
    "cyan",
    "magenta",
    "aqua",
    "lime",
    "navy",
    "teal",
    "olive",
    "maroon",
    "silver",
    "gold",
    "coral",
    "crimson",
    "indigo",
    "ivory",
    "khaki",
    "lavender",
    "salmon",
    "turquoise",
    "violet",
    "beige",
];

/// Keyword sets for enumerated properties; doubles as the common-value
/// suggestions the external dropdown editors present
const KEYWORD_SETS: &[(&str, &[&str])] = &[
    (
        "display",
        &["block", "inline", "inline-block", "flex", "grid", "none"],
    ),
    (
        "position",
        &["static", "relative", "absolute", "fixed", "sticky"],
    ),
    (
        "flex-direction",
        &["row", "row-reverse", "column", "column-reverse"],
    ),
    (
        "justify-content",
        &[
            "flex-start",
            "flex-end",
            "center",
            "space-between",
            "space-around",
            "space-evenly",
        ],
    ),
    (
        "align-items",
        &["flex-start", "flex-end", "center", "baseline", "stretch"],
    ),
    ("text-align", &["left", "center", "right", "justify"]),
    (
        "font-weight",
        &[
            "normal", "bold", "100", "200", "300", "400", "500", "600", "700", "800", "900",
        ],
    ),
    (
        "text-transform",
        &["none", "capitalize", "uppercase", "lowercase"],
    ),
    ("overflow", &["visible", "hidden", "scroll", "auto"]),
    (
        "cursor",
        &["auto", "pointer", "grab", "text", "move", "not-allowed"],
    ),
];

/// Properties whose grammar is a bare number
const NUMBER_PROPERTIES: &[&str] = &["opacity", "z-index", "flex-grow", "flex-shrink", "order"];

/// Properties the engine does not model; any non-empty value passes
const FREEFORM_PROPERTIES: &[&str] = &[
    "font-family",
    "font-style",
    "line-height",
    "box-shadow",
    "text-shadow",
    "transform",
    "transition",
    "animation",
    "background-image",
    "filter",
    "border",
    "outline",
    "content",
];

/// Grammar class the engine assigns to a property
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Color,
    Length,
    Number,
    Keyword(&'static [&'static str]),
    Freeform,
}

/// Classify a property, `None` when the engine does not know it
pub fn property_kind(property: &str) -> Option<PropertyKind> {
    if let Some(set) = common_values(property) {
        return Some(PropertyKind::Keyword(set));
    }
    if FREEFORM_PROPERTIES.contains(&property) {
        return Some(PropertyKind::Freeform);
    }
    if property.contains("color") || property == "background" {
        return Some(PropertyKind::Color);
    }
    if NUMBER_PROPERTIES.contains(&property) {
        return Some(PropertyKind::Number);
    }
    if is_length_property(property) {
        return Some(PropertyKind::Length);
    }
    None
}

fn is_length_property(property: &str) -> bool {
    const BARE: &[&str] = &["top", "left", "right", "bottom", "gap", "row-gap", "column-gap"];
    property.starts_with("margin")
        || property.starts_with("padding")
        || property.ends_with("width")
        || property.ends_with("height")
        || property.ends_with("size")
        || property.ends_with("radius")
        || property.ends_with("spacing")
        || property.ends_with("indent")
        || BARE.contains(&property)
}

/// Keyword suggestions for a property, for dropdown-style editors
pub fn common_values(property: &str) -> Option<&'static [&'static str]> {
    KEYWORD_SETS
        .iter()
        .find(|&&(name, _)| name == property)
        .map(|&(_, set)| set)
}

pub fn is_css_wide_keyword(value: &str) -> bool {
    CSS_WIDE_KEYWORDS
        .iter()
        .any(|k| value.eq_ignore_ascii_case(k))
}

/// Run a value through the engine for a property
///
/// Returns the value the style engine would retain (currently the trimmed
/// input), or `None` when assignment would normalize it away. An empty
/// value passes; writing it removes the declaration.
pub fn normalize(property: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_css_wide_keyword(trimmed) {
        return Some(trimmed.to_string());
    }
    if property.starts_with("--") {
        return Some(trimmed.to_string());
    }
    let kind = match property_kind(property) {
        Some(kind) => kind,
        None => {
            debug!(property, "unknown property rejected");
            return None;
        }
    };
    let accepted = match kind {
        PropertyKind::Color => is_color(trimmed),
        PropertyKind::Length => is_length(trimmed),
        PropertyKind::Number => is_number(trimmed),
        PropertyKind::Keyword(set) => set.iter().any(|k| trimmed.eq_ignore_ascii_case(k)),
        PropertyKind::Freeform => true,
    };
    if accepted {
        Some(trimmed.to_string())
    } else {
        debug!(property, value = trimmed, "value rejected");
        None
    }
}

// -------------------------------------------------------------------------
// Grammars
// -------------------------------------------------------------------------

fn hex_color(input: &str) -> IResult<&str, &str> {
    verify(
        preceded(
            char('#'),
            take_while_m_n(3, 8, |c: char| c.is_ascii_hexdigit()),
        ),
        |digits: &str| matches!(digits.len(), 3 | 4 | 6 | 8),
    )(input)
}

fn color_component(input: &str) -> IResult<&str, &str> {
    delimited(
        multispace0,
        recognize(tuple((float, opt(char('%'))))),
        multispace0,
    )(input)
}

fn functional_color(input: &str) -> IResult<&str, ()> {
    let (rest, (_, args)) = tuple((
        alt((
            tag_no_case("rgba"),
            tag_no_case("rgb"),
            tag_no_case("hsla"),
            tag_no_case("hsl"),
        )),
        delimited(
            preceded(multispace0, char('(')),
            separated_list1(char(','), color_component),
            char(')'),
        ),
    ))(input)?;
    if matches!(args.len(), 3 | 4) {
        Ok((rest, ()))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )))
    }
}

fn is_color(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    if NAMED_COLORS.contains(&lowered.as_str()) {
        return true;
    }
    all_consuming(hex_color)(value).is_ok() || all_consuming(functional_color)(value).is_ok()
}

fn is_length(value: &str) -> bool {
    if value.eq_ignore_ascii_case("auto") {
        return true;
    }
    match float::<&str, nom::error::Error<&str>>(value) {
        Ok((rest, number)) => {
            if rest.is_empty() {
                // Unitless lengths are only valid at zero
                number == 0.0
            } else {
                LENGTH_UNITS.contains(&rest)
            }
        }
        Err(_) => false,
    }
}

fn is_number(value: &str) -> bool {
    all_consuming(float::<&str, nom::error::Error<&str>>)(value).is_ok()
}

// -------------------------------------------------------------------------
// Color conversions (for the external color editor)
// -------------------------------------------------------------------------

/// Convert a leading `rgb(r, g, b` / `rgba(r, g, b` to `#rrggbb`
///
/// Mirrors the tolerant conversion color inputs need: trailing alpha and a
/// missing closing paren are ignored.
pub fn rgb_to_hex(value: &str) -> Option<String> {
    let mut channels = preceded(
        tuple((
            alt((tag_no_case("rgba"), tag_no_case("rgb"))),
            multispace0,
            char('('),
        )),
        separated_pair(
            delimited(multispace0, channel, multispace0),
            char(','),
            separated_pair(
                delimited(multispace0, channel, multispace0),
                char(','),
                delimited(multispace0, channel, multispace0),
            ),
        ),
    );
    let parsed: IResult<&str, (u8, (u8, u8))> = channels(value);
    let (r, (g, b)) = parsed.ok().map(|(_, parsed)| parsed)?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Parse a `#rrggbb` hex color into channels; the leading `#` is optional
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB channels to rounded HSL (`h` in degrees, `s`/`l` percent)
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // achromatic
        return (0, 0, (l * 100.0).round() as u8);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    (
        (h * 360.0).round() as u16,
        (s * 100.0).round() as u8,
        (l * 100.0).round() as u8,
    )
}
