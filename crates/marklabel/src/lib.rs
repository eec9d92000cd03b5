//! HTML-subset rich text labels.
//!
//! # Scope
//!
//! This crate provides:
//! - **Label model** - markup, configuration, and width in; plain text,
//!   styled runs, links, and one current layout out
//! - **Link touch states** - pressed, released, held, and cancelled, with
//!   active and inactive link styles
//! - **Configuration** - JSON-loadable style and layout settings
//! - **Static sizing** - bounding size and height of markup without a label
//!
//! Drawing, gesture recognition, and view lifecycle belong to the consumer.
//!
//! ```
//! use marklabel::{HtmlLabel, Point};
//!
//! let mut label = HtmlLabel::default();
//! label.set_width(200.0);
//! label.set_text("Read the <a href=\"https://example.com\">docs</a>");
//! assert_eq!(label.plain_text(), "Read the docs");
//! assert_eq!(label.links()[0].url, "https://example.com");
//! assert!(label.layout().line_count() >= 1);
//! assert!(label.link_at(Point::new(1.0, 1.0)).is_none());
//! ```

/// Label configuration.
pub mod config;
/// The stateful label model.
pub mod label;
/// Sizing without a label instance.
pub mod sizing;

pub use marklabel_common as common;
pub use marklabel_html as html;
pub use marklabel_layout as layout;
pub use marklabel_style as style;

pub use config::{ConfigError, DEFAULT_ACTIVE_LINK_COLOR, LabelConfig};
pub use label::{HtmlLabel, LinkDelegate};
pub use marklabel_layout::{
    ApproximateFontMetrics, EdgeInsets, FontMetrics, LineBreakMode, LineMetrics, LineRecord,
    ParagraphStyle, Point, Size, TextAlignment, TextLayout, VerticalAlignment,
};
pub use marklabel_style::{
    AttributeSet, Color, FontDescriptor, LinkSpan, StyleOverrides, StyledRun, UnderlineStyle,
};
pub use sizing::{bounding_size, height_for_markup, layout_markup};
