//! Named character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The full table defines 2,231 entities. Label text only ever needs the XML
//! five plus the punctuation, currency, and Latin-1 letters that show up in
//! user-generated content, so that is what this table carries.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Entity names (without `&` and `;`) to their replacement text.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // XML predefined entities
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        // Spaces and joiners
        ("nbsp", "\u{00A0}"),
        ("ensp", "\u{2002}"),
        ("emsp", "\u{2003}"),
        ("thinsp", "\u{2009}"),
        ("zwnj", "\u{200C}"),
        ("zwj", "\u{200D}"),
        ("lrm", "\u{200E}"),
        ("rlm", "\u{200F}"),
        ("shy", "\u{00AD}"),
        // Punctuation
        ("hellip", "\u{2026}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("sbquo", "\u{201A}"),
        ("ldquo", "\u{201C}"),
        ("rdquo", "\u{201D}"),
        ("bdquo", "\u{201E}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("lsaquo", "\u{2039}"),
        ("rsaquo", "\u{203A}"),
        ("iexcl", "\u{00A1}"),
        ("iquest", "\u{00BF}"),
        ("para", "\u{00B6}"),
        ("sect", "\u{00A7}"),
        ("dagger", "\u{2020}"),
        ("Dagger", "\u{2021}"),
        ("prime", "\u{2032}"),
        ("Prime", "\u{2033}"),
        ("permil", "\u{2030}"),
        // Symbols
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("deg", "\u{00B0}"),
        ("micro", "\u{00B5}"),
        ("hearts", "\u{2665}"),
        ("larr", "\u{2190}"),
        ("uarr", "\u{2191}"),
        ("rarr", "\u{2192}"),
        ("darr", "\u{2193}"),
        ("harr", "\u{2194}"),
        // Currency
        ("cent", "\u{00A2}"),
        ("pound", "\u{00A3}"),
        ("euro", "\u{20AC}"),
        ("yen", "\u{00A5}"),
        ("curren", "\u{00A4}"),
        // Math
        ("times", "\u{00D7}"),
        ("divide", "\u{00F7}"),
        ("plusmn", "\u{00B1}"),
        ("minus", "\u{2212}"),
        ("ne", "\u{2260}"),
        ("le", "\u{2264}"),
        ("ge", "\u{2265}"),
        ("frac12", "\u{00BD}"),
        ("frac14", "\u{00BC}"),
        ("frac34", "\u{00BE}"),
        ("sup1", "\u{00B9}"),
        ("sup2", "\u{00B2}"),
        ("sup3", "\u{00B3}"),
        // Latin-1 letters
        ("Agrave", "\u{00C0}"),
        ("Aacute", "\u{00C1}"),
        ("Auml", "\u{00C4}"),
        ("Ccedil", "\u{00C7}"),
        ("Eacute", "\u{00C9}"),
        ("Ntilde", "\u{00D1}"),
        ("Ouml", "\u{00D6}"),
        ("Uuml", "\u{00DC}"),
        ("szlig", "\u{00DF}"),
        ("agrave", "\u{00E0}"),
        ("aacute", "\u{00E1}"),
        ("acirc", "\u{00E2}"),
        ("auml", "\u{00E4}"),
        ("aring", "\u{00E5}"),
        ("ccedil", "\u{00E7}"),
        ("egrave", "\u{00E8}"),
        ("eacute", "\u{00E9}"),
        ("ecirc", "\u{00EA}"),
        ("euml", "\u{00EB}"),
        ("iacute", "\u{00ED}"),
        ("iuml", "\u{00EF}"),
        ("ntilde", "\u{00F1}"),
        ("oacute", "\u{00F3}"),
        ("ocirc", "\u{00F4}"),
        ("ouml", "\u{00F6}"),
        ("oslash", "\u{00F8}"),
        ("uacute", "\u{00FA}"),
        ("uuml", "\u{00FC}"),
    ])
});

/// Entities that browsers still recognise without the trailing semicolon.
///
/// [§ 13.5](https://html.spec.whatwg.org/multipage/named-characters.html)
/// lists these as legacy forms, e.g. `&amp` matches like `&amp;`.
const LEGACY_WITHOUT_SEMICOLON: &[&str] = &[
    "amp", "lt", "gt", "quot", "nbsp", "copy", "reg", "deg", "times", "divide", "para",
    "sect", "middot", "laquo", "raquo",
];

/// Look up a named entity by its exact name (without `&` or `;`).
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Find the longest legacy entity name that is a prefix of `candidate`.
///
/// Returns the matched name and its replacement.
#[must_use]
pub fn longest_legacy_prefix(candidate: &str) -> Option<(&'static str, &'static str)> {
    LEGACY_WITHOUT_SEMICOLON
        .iter()
        .filter(|name| candidate.starts_with(**name))
        .max_by_key(|name| name.len())
        .and_then(|name| lookup(name).map(|value| (*name, value)))
}
