//! Tag grammar, attribute values, style resolution, and link extraction for marklabel.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag grammar** (bold, italic, underline, strike, color, font, stroke,
//!   kern, span, line break, anchor, pre) with case-insensitive aliases
//!
//! - **Attribute values** ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/))
//!   - Named and hex colors (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`)
//!   - Decimal numbers with an optional `px`/`pt` suffix
//!   - Compact font references `family, size, style`
//!
//! - **Style resolution**: a token stream becomes contiguous styled runs via
//!   an attribute stack, with HTML whitespace collapsing outside `<pre>`
//!
//! - **Link extraction**: anchor ranges and targets, innermost anchor wins
//!
//! # Not Implemented
//!
//! - CSS selectors and the cascade; `style` only takes inline declarations
//! - Shadows and images

/// Resolved text attributes and partial overrides.
pub mod attributes;
/// Color values per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// Font descriptors and references.
pub mod font;
/// Supported tags and inline style keys.
pub mod grammar;
/// Link spans and anchor bookkeeping.
pub mod links;
/// Token stream to styled runs.
pub mod resolver;
/// Attribute value parsing.
pub mod value;

pub use attributes::{AttributeSet, LinkRef, StyleOverrides, UnderlineStyle};
pub use color::Color;
pub use font::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, FontDescriptor, FontStyle};
pub use grammar::{InlineKey, Tag};
pub use links::{LinkExtractor, LinkSpan, find_degraded_anchors, restyle_links, restyle_other_links};
pub use resolver::{
    DEFAULT_LINK_COLOR, ResolvedText, StyleContext, StyleResolver, StyledRun, default_link_style,
    resolve_markup,
};
pub use value::ValueError;
