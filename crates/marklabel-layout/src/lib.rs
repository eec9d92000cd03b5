//! Line breaking, truncation, measurement, and hit-testing for marklabel.
//!
//! # Scope
//!
//! This crate implements:
//! - **Measurement** through the [`FontMetrics`] trait, with fixed-ratio
//!   [`ApproximateFontMetrics`] for sizing without font data
//! - **Line breaking** ([CSS Text Level 3 § 5](https://www.w3.org/TR/css-text-3/#line-breaking))
//!   - Hard breaks at `'\n'`
//!   - Greedy soft wrapping at spaces, hanging trailing spaces
//!   - Character breaking of words wider than the line
//! - **Truncation** ([CSS Overflow Level 3 § 3.2](https://www.w3.org/TR/css-overflow-3/#text-overflow))
//!   - Tail truncation of the last line under a line limit
//!   - Single-line head, middle, and tail modes
//! - **Paragraph attributes**: first-line indent, line spacing, line-height
//!   multiple, insets, horizontal and vertical alignment
//! - **Hit-testing**: point to line, character boundary, character, and link
//!
//! # Not Implemented
//!
//! - Bidirectional text and shaping; advances are per character
//! - Hyphenation and CJK break opportunities
//! - Justified alignment

/// Points, sizes, rectangles, and insets.
pub mod geometry;
/// Point to character and link lookup.
pub mod hit_test;
/// Greedy line breaking.
mod line_break;
/// Per-character advances.
mod measure;
/// Font measurement.
pub mod metrics;
/// Layout options.
pub mod paragraph;
/// Laying out runs into measured lines.
pub mod text_layout;
/// Cutting lines to fit a truncation token.
pub mod truncation;

pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use metrics::{ApproximateFontMetrics, FontMetrics, LineMetrics};
pub use paragraph::{
    LayoutOptions, LineBreakMode, ParagraphStyle, TextAlignment, TruncationToken,
    VerticalAlignment,
};
pub use text_layout::{LineRecord, TextLayout, layout};
pub use truncation::{Truncation, TruncationMode};
