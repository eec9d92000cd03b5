//! Resolved text attributes.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::color::Color;
use crate::font::FontDescriptor;

/// Underline decoration, selected by level 0, 1, or 2 in markup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineStyle {
    /// Level 0.
    #[default]
    None,
    /// Level 1.
    Single,
    /// Level 2.
    Double,
}

impl UnderlineStyle {
    /// Map a markup level to a style. Levels outside `0..=2` are rejected.
    #[must_use]
    pub const fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::None),
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            _ => None,
        }
    }
}

/// Identity of the anchor a run belongs to.
///
/// The id keeps two adjacent anchors with the same URL from merging into one
/// run, and lets a view restyle a single link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinkRef {
    /// Index of the anchor in document order, starting at 0.
    pub id: usize,
    /// Resolved link target.
    pub href: String,
}

/// The fully resolved style at one point of the markup.
///
/// Every field is independently inherited from the enclosing tag and
/// independently overridable by the current one. Sets are compared by value
/// when deciding whether two pieces of text belong to the same run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSet {
    /// Family, size, weight, and slant.
    pub font: FontDescriptor,
    /// Text fill color.
    pub color: Color,
    /// Outline width in points. 0 draws no outline.
    pub stroke_width: f32,
    /// Outline color. `None` strokes with the text color.
    pub stroke_color: Option<Color>,
    /// Underline decoration.
    pub underline: UnderlineStyle,
    /// Line through the text.
    pub strikethrough: bool,
    /// Extra advance after every character, in points. Negative condenses.
    pub kerning: f32,
    /// Set when the text is inside an anchor.
    pub link: Option<LinkRef>,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            color: Color::BLACK,
            stroke_width: 0.0,
            stroke_color: None,
            underline: UnderlineStyle::None,
            strikethrough: false,
            kerning: 0.0,
            link: None,
        }
    }
}

impl AttributeSet {
    /// Base attributes for a label with the given font and text color.
    #[must_use]
    pub fn new(font: FontDescriptor, color: Color) -> Self {
        Self {
            font,
            color,
            ..Self::default()
        }
    }

    /// The color the outline is drawn with.
    #[must_use]
    pub fn effective_stroke_color(&self) -> Color {
        self.stroke_color.unwrap_or(self.color)
    }
}

/// A partial attribute set: only the fields that are `Some` are applied.
///
/// Used for link styling (normal, active, inactive) and for the attributes
/// of the truncation token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    /// Font family.
    pub font_family: Option<String>,
    /// Font point size.
    pub font_size: Option<f32>,
    /// Bold weight.
    pub bold: Option<bool>,
    /// Italic slant.
    pub italic: Option<bool>,
    /// Text color.
    pub color: Option<Color>,
    /// Outline width.
    pub stroke_width: Option<f32>,
    /// Outline color.
    pub stroke_color: Option<Color>,
    /// Underline decoration.
    pub underline: Option<UnderlineStyle>,
    /// Line through the text.
    pub strikethrough: Option<bool>,
    /// Extra advance per character.
    pub kerning: Option<f32>,
}

impl StyleOverrides {
    /// True if applying these overrides changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields of `set` that these overrides specify.
    pub fn apply_to(&self, set: &mut AttributeSet) {
        if let Some(family) = &self.font_family {
            set.font.family.clone_from(family);
        }
        if let Some(size) = self.font_size {
            set.font.size = size;
        }
        if let Some(bold) = self.bold {
            set.font.bold = bold;
        }
        if let Some(italic) = self.italic {
            set.font.italic = italic;
        }
        if let Some(color) = self.color {
            set.color = color;
        }
        if let Some(width) = self.stroke_width {
            set.stroke_width = width;
        }
        if let Some(color) = self.stroke_color {
            set.stroke_color = Some(color);
        }
        if let Some(underline) = self.underline {
            set.underline = underline;
        }
        if let Some(strike) = self.strikethrough {
            set.strikethrough = strike;
        }
        if let Some(kerning) = self.kerning {
            set.kerning = kerning;
        }
    }

    /// `set` with these overrides applied.
    #[must_use]
    pub fn applied(&self, set: &AttributeSet) -> AttributeSet {
        let mut out = set.clone();
        self.apply_to(&mut out);
        out
    }
}
