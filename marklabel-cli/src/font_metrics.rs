//! Font metrics backed by fontdue for accurate text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fontdue::{Font, FontSettings};
use marklabel::{ApproximateFontMetrics, FontDescriptor, FontMetrics, LineMetrics};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Font metrics from fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` rather than `Font::rasterize()`: only advances are
/// needed, not bitmaps. Every family in the markup is measured with the one
/// loaded face, bold text with the bold face when one was found.
pub struct FontdueFontMetrics {
    regular: Font,
    bold: Option<Font>,
}

impl FontdueFontMetrics {
    /// Load a font file. The bold face is searched for on the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a font.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data =
            std::fs::read(path).with_context(|| format!("failed to read font '{}'", path.display()))?;
        let regular = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font '{}': {e}", path.display()))?;
        Ok(Self {
            regular,
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS),
        })
    }

    /// The first system font found, if any.
    #[must_use]
    pub fn from_system() -> Option<Self> {
        Some(Self {
            regular: load_font_from_paths(FONT_SEARCH_PATHS)?,
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS),
        })
    }

    fn face(&self, font: &FontDescriptor) -> &Font {
        match &self.bold {
            Some(bold) if font.bold => bold,
            _ => &self.regular,
        }
    }
}

fn load_font_from_paths(paths: &[&str]) -> Option<Font> {
    paths.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        Font::from_bytes(data, FontSettings::default()).ok()
    })
}

impl FontMetrics for FontdueFontMetrics {
    fn advance(&self, ch: char, font: &FontDescriptor) -> f32 {
        if ch.is_control() {
            return 0.0;
        }
        self.face(font).metrics(ch, font.size).advance_width
    }

    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics {
        // fontdue reports descent below the baseline as a negative number.
        self.face(font).horizontal_line_metrics(font.size).map_or_else(
            || ApproximateFontMetrics.line_metrics(font),
            |metrics| LineMetrics {
                ascent: metrics.ascent,
                descent: -metrics.descent,
                leading: metrics.line_gap,
            },
        )
    }
}
