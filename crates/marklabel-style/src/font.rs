//! Font references.
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::value::{ValueError, parse_font_size, parse_font_style};

/// Default point size of a label's base font.
pub const DEFAULT_FONT_SIZE: f32 = 17.0;

/// Default family of a label's base font.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica Neue";

/// The `style` keyword of a font reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright, regular weight. Clears bold and italic.
    Normal,
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
}

/// A fully specified font: family, point size, weight, and slant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    /// Family name, e.g. `"Helvetica Neue"`.
    pub family: String,
    /// Point size.
    pub size: f32,
    /// [§ 3.2 `font-weight`](https://www.w3.org/TR/css-fonts-4/#font-weight-prop), reduced to regular/bold.
    pub bold: bool,
    /// [§ 3.4 `font-style`](https://www.w3.org/TR/css-fonts-4/#font-style-prop), reduced to upright/italic.
    pub italic: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

impl FontDescriptor {
    /// Regular upright font of the given family and size.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Apply a style keyword.
    pub const fn apply_style(&mut self, style: FontStyle) {
        match style {
            FontStyle::Normal => {
                self.bold = false;
                self.italic = false;
            }
            FontStyle::Bold => self.bold = true,
            FontStyle::Italic => self.italic = true,
        }
    }

    /// Apply a compact font reference: `family[, size[, style]]`.
    ///
    /// Empty components keep the current value, so `",20"` only changes the
    /// size. Nothing is modified unless every present component is valid.
    ///
    /// # Errors
    ///
    /// Returns the first invalid component.
    pub fn apply_reference(&mut self, reference: &str) -> Result<(), ValueError> {
        let mut parts = reference.split(',').map(str::trim);
        let family = parts.next().filter(|f| !f.is_empty());
        let size = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(parse_font_size)
            .transpose()?;
        let style = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(parse_font_style)
            .transpose()?;

        if let Some(family) = family {
            family.clone_into(&mut self.family);
        }
        if let Some(size) = size {
            self.size = size;
        }
        if let Some(style) = style {
            self.apply_style(style);
        }
        Ok(())
    }
}
