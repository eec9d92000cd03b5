//! Character reference decoding.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The WHATWG tokenizer spreads character references over nine states. Label
//! markup is short and always fully buffered, so the same rules are applied
//! here as a single lookahead over the input that follows the `&`.

use super::named_character_references::{longest_legacy_prefix, lookup};

/// A decoded character reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReference {
    /// Replacement text.
    pub text: String,
    /// Number of bytes consumed after the `&`.
    pub consumed: usize,
    /// "missing-semicolon-after-character-reference" parse error.
    pub missing_semicolon: bool,
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: &[(u32, char)] = &[
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Decode the character reference that starts right after a `&`.
///
/// `input` is the remainder of the markup following the ampersand.
/// `in_attribute` applies the attribute-value legacy rule: a semicolon-less
/// named reference followed by `=` or an alphanumeric is left alone.
///
/// Returns `None` when the text is not a character reference, in which case
/// the `&` is literal text.
#[must_use]
pub fn decode_character_reference(input: &str, in_attribute: bool) -> Option<DecodedReference> {
    if let Some(rest) = input.strip_prefix('#') {
        return decode_numeric(rest).map(|mut decoded| {
            decoded.consumed += 1;
            decoded
        });
    }
    decode_named(input, in_attribute)
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
fn decode_named(input: &str, in_attribute: bool) -> Option<DecodedReference> {
    let name_len = input
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(input.len());
    if name_len == 0 {
        return None;
    }
    let name = &input[..name_len];

    // "Consume the maximum number of characters possible, where the consumed
    // characters are one of the identifiers in the named character references
    // table."
    if input[name_len..].starts_with(';')
        && let Some(text) = lookup(name)
    {
        return Some(DecodedReference {
            text: text.to_string(),
            consumed: name_len + 1,
            missing_semicolon: false,
        });
    }

    let (legacy, text) = longest_legacy_prefix(name)?;
    let next = input[legacy.len()..].chars().next();

    // "If the character reference was consumed as part of an attribute, and
    // the last character matched is not a U+003B SEMICOLON character (;), and
    // the next input character is either a U+003D EQUALS SIGN character (=) or
    // an ASCII alphanumeric, then, for historical reasons, flush code points
    // consumed as a character reference and switch to the return state."
    if in_attribute && next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(DecodedReference {
        text: text.to_string(),
        consumed: legacy.len(),
        missing_semicolon: true,
    })
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
fn decode_numeric(input: &str) -> Option<DecodedReference> {
    let (digits_start, radix) = match input.chars().next() {
        Some('x' | 'X') => (1, 16),
        _ => (0, 10),
    };
    let digits = &input[digits_start..];
    let digit_len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());

    // "absence-of-digits-in-numeric-character-reference parse error ...
    // flush code points consumed as a character reference."
    if digit_len == 0 {
        return None;
    }

    // Saturate instead of overflowing; anything past U+10FFFF is replaced below.
    let code = digits[..digit_len]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u32, |acc, d| acc.saturating_mul(radix).saturating_add(d));

    let missing_semicolon = !digits[digit_len..].starts_with(';');
    let consumed = digits_start + digit_len + usize::from(!missing_semicolon);

    Some(DecodedReference {
        text: numeric_reference_char(code).to_string(),
        consumed,
        missing_semicolon,
    })
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is 0x00 ... If the number is greater than 0x10FFFF ...
/// If the number is a surrogate ... set the character reference code to
/// 0xFFFD."
fn numeric_reference_char(code: u32) -> char {
    if let Some((_, replacement)) = C1_REPLACEMENTS.iter().find(|(from, _)| *from == code) {
        return *replacement;
    }
    if code == 0 {
        return '\u{FFFD}';
    }
    char::from_u32(code).unwrap_or('\u{FFFD}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &str) -> Option<(String, usize)> {
        decode_character_reference(input, false).map(|d| (d.text, d.consumed))
    }

    #[test]
    fn test_named_with_semicolon() {
        assert_eq!(decode("amp; rest"), Some(("&".to_string(), 4)));
        assert_eq!(decode("hellip;"), Some(("\u{2026}".to_string(), 7)));
    }

    #[test]
    fn test_legacy_named_without_semicolon() {
        assert_eq!(decode("ampx"), Some(("&".to_string(), 3)));
        assert_eq!(decode_character_reference("amp=1", true), None);
        assert_eq!(decode("hellip"), None);
    }

    #[test]
    fn test_unknown_named_is_literal() {
        assert_eq!(decode("bogus;"), None);
        assert_eq!(decode(" space"), None);
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode("#65;"), Some(("A".to_string(), 4)));
        assert_eq!(decode("#x41;"), Some(("A".to_string(), 5)));
        assert_eq!(decode("#X6a"), Some(("j".to_string(), 4)));
        assert_eq!(decode("#;"), None);
        assert_eq!(decode("#x;"), None);
    }

    #[test]
    fn test_invalid_code_points_are_replaced() {
        assert_eq!(decode("#0;"), Some(("\u{FFFD}".to_string(), 3)));
        assert_eq!(decode("#xD800;"), Some(("\u{FFFD}".to_string(), 7)));
        assert_eq!(decode("#99999999999;").map(|d| d.0), Some("\u{FFFD}".to_string()));
        assert_eq!(decode("#x80;").map(|d| d.0), Some("\u{20AC}".to_string()));
    }
}
