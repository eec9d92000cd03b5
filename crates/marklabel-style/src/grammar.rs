//! The supported tag set and inline style keys.
//!
//! Tag and key names are matched case-insensitively. Anything not listed here
//! is ignored by the resolver: unknown tags keep their text and lose their
//! markup, unknown keys are skipped.

use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::attributes::{AttributeSet, UnderlineStyle};
use crate::color::Color;
use crate::value::{
    ValueError, parse_font_size, parse_font_style, parse_number, parse_stroke_width,
    parse_underline,
};

/// A recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tag {
    /// Bold weight.
    #[strum(to_string = "b", serialize = "bold", serialize = "strong")]
    Bold,
    /// Italic slant.
    #[strum(to_string = "i", serialize = "italic", serialize = "em")]
    Italic,
    /// Underline; `level` selects none/single/double.
    #[strum(to_string = "u", serialize = "underline")]
    Underline,
    /// Strikethrough.
    #[strum(to_string = "s", serialize = "strike", serialize = "del")]
    Strike,
    /// Text color.
    Color,
    /// Any combination of inline keys, classically `face`, `size`, `color`.
    Font,
    /// Outline: `width` and `color` refer to the stroke.
    Stroke,
    /// Character spacing from `value`.
    #[strum(to_string = "kern", serialize = "kerning")]
    Kern,
    /// Style-neutral container for inline keys.
    Span,
    /// Hard line break.
    Br,
    /// Anchor with `href`.
    #[strum(to_string = "a", serialize = "link")]
    Link,
    /// Whitespace is kept verbatim inside.
    Pre,
}

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements." These never open a frame on the attribute stack.
pub const VOID_TAG_NAMES: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "meta", "param", "source",
    "track", "wbr",
];

/// Whether `name` is a void element (never has content or an end tag).
#[must_use]
pub fn is_void(name: &str) -> bool {
    VOID_TAG_NAMES.contains(&name)
}

/// The name a tag is tracked under on the attribute stack.
///
/// Known tags use their primary name, so `</strong>` closes `<b>`; unknown
/// tags are matched by their literal (lowercased) name.
#[must_use]
pub fn frame_key(name: &str) -> String {
    Tag::from_name(name).map_or_else(|| name.to_ascii_lowercase(), |tag| tag.to_string())
}

/// A recognized inline style key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum InlineKey {
    /// Text color.
    #[strum(to_string = "color", serialize = "foreground-color")]
    Color,
    /// Non-negative outline width.
    #[strum(to_string = "stroke-width", serialize = "stroke", serialize = "strokewidth")]
    StrokeWidth,
    /// Outline color.
    #[strum(to_string = "stroke-color", serialize = "strokecolor")]
    StrokeColor,
    /// Compact reference `family[, size[, style]]`.
    #[strum(to_string = "font")]
    Font,
    /// Font family.
    #[strum(to_string = "face", serialize = "family", serialize = "font-family")]
    FontFamily,
    /// Positive point size.
    #[strum(to_string = "size", serialize = "font-size")]
    FontSize,
    /// `normal`, `bold`, or `italic`.
    #[strum(to_string = "font-style", serialize = "style")]
    FontStyle,
    /// Level 0–2.
    #[strum(to_string = "underline")]
    Underline,
    /// Character spacing, positive expands.
    #[strum(to_string = "kerning", serialize = "kern", serialize = "letter-spacing")]
    Kerning,
}

impl Tag {
    /// Look up a tag by (any-case) name or alias.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// Attributes implied by the tag itself, applied before any attribute
    /// written on it.
    pub fn apply_implied(self, set: &mut AttributeSet) {
        match self {
            Self::Bold => set.font.bold = true,
            Self::Italic => set.font.italic = true,
            Self::Underline => set.underline = UnderlineStyle::Single,
            Self::Strike => set.strikethrough = true,
            Self::Color
            | Self::Font
            | Self::Stroke
            | Self::Kern
            | Self::Span
            | Self::Br
            | Self::Link
            | Self::Pre => {}
        }
    }

    /// Map an attribute written on this tag to the key it sets.
    ///
    /// Some tags give generic attribute names a tag-specific meaning:
    /// `<stroke color=...>` is the stroke color, `<u level=2>` the underline
    /// level, `<kern value=...>` the kerning.
    #[must_use]
    pub fn attribute_key(self, attribute: &str) -> Option<InlineKey> {
        let specific = match (self, attribute.to_ascii_lowercase().as_str()) {
            (Self::Stroke, "color") => Some(InlineKey::StrokeColor),
            (Self::Stroke, "width") => Some(InlineKey::StrokeWidth),
            (Self::Underline, "level" | "u") => Some(InlineKey::Underline),
            (Self::Kern, "value") => Some(InlineKey::Kerning),
            _ => None,
        };
        specific.or_else(|| InlineKey::from_str(attribute).ok())
    }
}

impl InlineKey {
    /// Parse `value` and store it in `set`.
    ///
    /// # Errors
    ///
    /// Returns the parse error and leaves `set` untouched, so the inherited
    /// value stays in effect.
    pub fn apply(self, value: &str, set: &mut AttributeSet) -> Result<(), ValueError> {
        match self {
            Self::Color => set.color = Color::parse(value)?,
            Self::StrokeWidth => set.stroke_width = parse_stroke_width(value)?,
            Self::StrokeColor => set.stroke_color = Some(Color::parse(value)?),
            Self::Font => set.font.apply_reference(value)?,
            Self::FontFamily => {
                let family = value.trim().trim_matches(['"', '\'']);
                if family.is_empty() {
                    return Err(ValueError::UnknownKeyword {
                        attribute: "font family",
                        value: value.to_string(),
                    });
                }
                family.clone_into(&mut set.font.family);
            }
            Self::FontSize => set.font.size = parse_font_size(value)?,
            Self::FontStyle => set.font.apply_style(parse_font_style(value)?),
            Self::Underline => set.underline = parse_underline(value)?,
            Self::Kerning => set.kerning = parse_number(value)?,
        }
        Ok(())
    }
}

/// Split a `style` attribute into `(key, value)` declarations.
///
/// `"color: #f00; kerning: 1.5"` yields `[("color", "#f00"), ("kerning", "1.5")]`.
/// Declarations without a colon are dropped.
#[must_use]
pub fn parse_declarations(style: &str) -> Vec<(&str, &str)> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// A `style` attribute holds declarations when it contains a colon,
/// otherwise it is a font style keyword (`<font style=bold>`).
#[must_use]
pub fn is_declaration_list(style: &str) -> bool {
    style.contains(':')
}
