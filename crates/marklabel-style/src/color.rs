//! Color values and parsing.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Label markup accepts a named color or a hex literal wherever a color is
//! expected: `<color="#FF0000">`, `<font color=navy>`, `style="stroke-color: #0008"`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::ValueError;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
///
/// Serializes as its hex string, so configuration files can say
/// `"color": "#007aff"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The sixteen HTML 4 colors plus the handful of extended keywords that turn
/// up in hand-written label markup.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("white", [255, 255, 255]),
    ("maroon", [128, 0, 0]),
    ("red", [255, 0, 0]),
    ("purple", [128, 0, 128]),
    ("fuchsia", [255, 0, 255]),
    ("magenta", [255, 0, 255]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("olive", [128, 128, 0]),
    ("yellow", [255, 255, 0]),
    ("navy", [0, 0, 128]),
    ("blue", [0, 0, 255]),
    ("teal", [0, 128, 128]),
    ("aqua", [0, 255, 255]),
    ("cyan", [0, 255, 255]),
    ("orange", [255, 165, 0]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("gold", [255, 215, 0]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
];

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from red, green, and blue channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    ///
    /// "The three-digit RGB notation (#RGB) is converted into six-digit form
    /// (#RRGGBB) by replicating digits, not by adding zeros."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibbles: Vec<u8> = digits
            .chars()
            .filter_map(|c| c.to_digit(16))
            .filter_map(|d| u8::try_from(d).ok())
            .collect();

        let channel = |hi: u8, lo: u8| hi * 16 + lo;
        match nibbles.as_slice() {
            [r, g, b] => Some(Self::rgb(channel(*r, *r), channel(*g, *g), channel(*b, *b))),
            [r, g, b, a] => Some(Self {
                r: channel(*r, *r),
                g: channel(*g, *g),
                b: channel(*b, *b),
                a: channel(*a, *a),
            }),
            [r1, r2, g1, g2, b1, b2] => Some(Self::rgb(
                channel(*r1, *r2),
                channel(*g1, *g2),
                channel(*b1, *b2),
            )),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Some(Self {
                r: channel(*r1, *r2),
                g: channel(*g1, *g2),
                b: channel(*b1, *b2),
                a: channel(*a1, *a2),
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
    }

    /// Parse either encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidColor`] if `value` is neither a hex
    /// literal nor a known name.
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        let trimmed = value.trim();
        let parsed = if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else {
            Self::from_named(trimmed)
        };
        parsed.ok_or_else(|| ValueError::InvalidColor(value.to_string()))
    }

    /// Convert to hex string notation (#rrggbb, or #rrggbbaa if alpha != 255)
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for Color {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Color::parse("#FF0000"), Ok(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse("#0f0"), Ok(Color::rgb(0, 255, 0)));
        assert_eq!(
            Color::parse("#00000080"),
            Ok(Color {
                r: 0,
                g: 0,
                b: 0,
                a: 128
            })
        );
        assert_eq!(Color::parse("#abcd").map(|c| c.a), Ok(0xdd));
    }

    #[test]
    fn test_rejects_bad_hex() {
        assert!(Color::parse("#12").is_err());
        assert!(Color::parse("#GG0000").is_err());
        assert!(Color::parse("#ff00000").is_err());
    }

    #[test]
    fn test_named_is_case_insensitive() {
        assert_eq!(Color::parse("Navy"), Ok(Color::rgb(0, 0, 128)));
        assert_eq!(Color::parse("transparent"), Ok(Color::TRANSPARENT));
        assert!(Color::parse("blurple").is_err());
    }

    #[test]
    fn test_hex_string_round_trip() {
        let color = Color::rgb(0, 122, 255);
        assert_eq!(color.to_hex_string(), "#007aff");
        assert_eq!(Color::parse(&color.to_string()), Ok(color));
    }
}
