//! Font measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use marklabel_style::FontDescriptor;
use serde::Serialize;

/// Vertical metrics of a font at a given size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LineMetrics {
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline, positive.
    pub descent: f32,
    /// Recommended extra space between lines.
    pub leading: f32,
}

impl LineMetrics {
    /// `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide per-character advance widths and vertical metrics.
/// The layout engine adds each run's kerning on top of the advance.
pub trait FontMetrics {
    /// Advance width of `ch` in `font`.
    fn advance(&self, ch: char, font: &FontDescriptor) -> f32;

    /// Ascent, descent, and leading of `font`.
    ///
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics;

    /// Sum of the advances of every character of `text`.
    fn text_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        text.chars().map(|ch| self.advance(ch, font)).sum()
    }
}

/// Approximate font metrics using fixed ratios.
///
/// Without font data, the average advance of Latin glyphs in a proportional
/// font is taken as 0.6× the point size. Ascent, descent, and leading add up
/// to 1.2×, the upper end of the usual range for normal line height.
///
/// This is used for sizing without a font file, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const BOLD_WIDTH_RATIO: f32 = 0.65;
    const ASCENT_RATIO: f32 = 0.8;
    const DESCENT_RATIO: f32 = 0.2;
    const LEADING_RATIO: f32 = 0.2;
}

impl FontMetrics for ApproximateFontMetrics {
    fn advance(&self, ch: char, font: &FontDescriptor) -> f32 {
        if ch.is_control() {
            return 0.0;
        }
        let ratio = if font.bold {
            Self::BOLD_WIDTH_RATIO
        } else {
            Self::CHAR_WIDTH_RATIO
        };
        font.size * ratio
    }

    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics {
        LineMetrics {
            ascent: font.size * Self::ASCENT_RATIO,
            descent: font.size * Self::DESCENT_RATIO,
            leading: font.size * Self::LEADING_RATIO,
        }
    }
}
