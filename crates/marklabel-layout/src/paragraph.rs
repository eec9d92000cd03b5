//! Layout options.

use marklabel_style::{AttributeSet, FontDescriptor};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::geometry::EdgeInsets;

/// How text that does not fit is handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum LineBreakMode {
    /// Wrap at word boundaries. With a line limit, the last line is
    /// tail-truncated.
    #[default]
    WordWrap,
    /// Show one line; cut the start.
    TruncateHead,
    /// Show one line; cut the middle.
    TruncateMiddle,
    /// Show one line; cut the end.
    TruncateTail,
}

impl LineBreakMode {
    /// Head, middle, and tail modes always produce exactly one line.
    #[must_use]
    pub const fn is_single_line(self) -> bool {
        !matches!(self, Self::WordWrap)
    }
}

/// Horizontal placement of each line within the content width.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Vertical placement of the text block within a taller view.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Centered, the label default.
    #[default]
    Center,
    /// Pinned to the top.
    Top,
    /// Pinned to the bottom.
    Bottom,
}

/// Paragraph attributes applied to the whole text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    /// Extra indent of the first line of every paragraph.
    pub first_line_indent: f32,
    /// Extra space between consecutive lines.
    pub line_spacing: f32,
    /// Factor applied to each line's natural height.
    pub line_height_multiple: f32,
    /// Margins between the label bounds and the text.
    pub insets: EdgeInsets,
    /// Horizontal alignment of lines.
    pub alignment: TextAlignment,
    /// Vertical alignment of the text block.
    pub vertical_alignment: VerticalAlignment,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            first_line_indent: 0.0,
            line_spacing: 0.0,
            line_height_multiple: 1.0,
            insets: EdgeInsets::default(),
            alignment: TextAlignment::Left,
            vertical_alignment: VerticalAlignment::Center,
        }
    }
}

/// Text inserted where content is cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruncationToken {
    /// The token text, an ellipsis by default.
    pub text: String,
    /// Style of the token. `None` styles it like the text it replaces.
    pub attributes: Option<AttributeSet>,
}

impl Default for TruncationToken {
    fn default() -> Self {
        Self {
            text: "\u{2026}".to_string(),
            attributes: None,
        }
    }
}

/// Everything [`layout`](crate::layout) needs besides the runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOptions {
    /// Available width including horizontal insets.
    pub width: f32,
    /// Maximum number of lines. `None` and `Some(0)` mean unlimited.
    pub max_lines: Option<usize>,
    /// Wrapping or single-line truncation.
    pub line_break_mode: LineBreakMode,
    /// Indent, spacing, insets, and alignment.
    pub paragraph: ParagraphStyle,
    /// Inserted where text is cut.
    pub truncation_token: TruncationToken,
    /// Measures empty lines.
    pub base_font: FontDescriptor,
}

impl LayoutOptions {
    /// Unlimited word wrap at `width` with default paragraph attributes.
    #[must_use]
    pub fn new(width: f32) -> Self {
        Self {
            width,
            max_lines: None,
            line_break_mode: LineBreakMode::WordWrap,
            paragraph: ParagraphStyle::default(),
            truncation_token: TruncationToken::default(),
            base_font: FontDescriptor::default(),
        }
    }

    /// Set the line limit.
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    /// Set the line-break mode.
    #[must_use]
    pub fn with_mode(mut self, mode: LineBreakMode) -> Self {
        self.line_break_mode = mode;
        self
    }

    /// The line limit, if one applies.
    #[must_use]
    pub fn line_limit(&self) -> Option<usize> {
        self.max_lines.filter(|limit| *limit > 0)
    }

    /// Width left for text after horizontal insets.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - self.paragraph.insets.horizontal()
    }
}
