//! Attribute value parsing.
//!
//! Every parser returns a [`ValueError`] on bad input. The resolver turns
//! that into a warning and keeps the inherited value, so these errors never
//! reach the caller of [`resolve_markup`](crate::resolve_markup).

use std::str::FromStr;

use thiserror::Error;

use crate::attributes::UnderlineStyle;
use crate::font::FontStyle;

/// Why an attribute value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Not a `#` hex literal of 3, 4, 6, or 8 digits, and not a known color name.
    #[error("invalid color '{0}'")]
    InvalidColor(String),
    /// Not a finite decimal number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// A number outside the range the attribute accepts.
    #[error("{value} is out of range for {attribute}")]
    OutOfRange {
        /// Attribute being set.
        attribute: &'static str,
        /// The offending value as written.
        value: String,
    },
    /// Not one of the keywords the attribute accepts.
    #[error("unknown keyword '{value}' for {attribute}")]
    UnknownKeyword {
        /// Attribute being set.
        attribute: &'static str,
        /// The offending value as written.
        value: String,
    },
}

/// Parse a decimal number, tolerating a trailing `px` or `pt` unit.
///
/// # Errors
///
/// Returns [`ValueError::InvalidNumber`] for anything that is not a finite float.
pub fn parse_number(value: &str) -> Result<f32, ValueError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix("pt"))
        .unwrap_or(trimmed)
        .trim_end();
    f32::from_str(digits)
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValueError::InvalidNumber(value.to_string()))
}

/// Stroke widths are non-negative.
///
/// # Errors
///
/// Returns an error for non-numbers and negative numbers.
pub fn parse_stroke_width(value: &str) -> Result<f32, ValueError> {
    let width = parse_number(value)?;
    if width < 0.0 {
        return Err(ValueError::OutOfRange {
            attribute: "stroke width",
            value: value.to_string(),
        });
    }
    Ok(width)
}

/// Font sizes are strictly positive.
///
/// # Errors
///
/// Returns an error for non-numbers and sizes `<= 0`.
pub fn parse_font_size(value: &str) -> Result<f32, ValueError> {
    let size = parse_number(value)?;
    if size <= 0.0 {
        return Err(ValueError::OutOfRange {
            attribute: "font size",
            value: value.to_string(),
        });
    }
    Ok(size)
}

/// Underline level: `0`, `1`, `2` or `none`, `single`, `double`.
///
/// # Errors
///
/// Returns an error for any other value.
pub fn parse_underline(value: &str) -> Result<UnderlineStyle, ValueError> {
    let trimmed = value.trim();
    if let Ok(level) = trimmed.parse::<i64>() {
        return UnderlineStyle::from_level(level).ok_or_else(|| ValueError::OutOfRange {
            attribute: "underline",
            value: value.to_string(),
        });
    }
    UnderlineStyle::from_str(trimmed).map_err(|_| ValueError::UnknownKeyword {
        attribute: "underline",
        value: value.to_string(),
    })
}

/// Font style keyword: `normal`, `bold`, or `italic`.
///
/// # Errors
///
/// Returns an error for any other keyword.
pub fn parse_font_style(value: &str) -> Result<FontStyle, ValueError> {
    FontStyle::from_str(value.trim()).map_err(|_| ValueError::UnknownKeyword {
        attribute: "font style",
        value: value.to_string(),
    })
}
