//! Cutting a line down to fit a truncation token.
//!
//! [CSS Overflow Level 3 § 3.2 `text-overflow`](https://www.w3.org/TR/css-overflow-3/#text-overflow)
//!
//! "Implementations must hide characters and atomic inline-level elements at
//! the end edge of the line as necessary to fit the ellipsis."

use std::ops::Range;

use marklabel_style::AttributeSet;
use serde::Serialize;
use strum_macros::Display;

use crate::line_break::FIT_TOLERANCE;
use crate::measure::{Glyph, trim_end, trim_start};

/// Where a line was cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TruncationMode {
    /// The start of the line was replaced by the token.
    Head,
    /// The middle of the line was replaced by the token.
    Middle,
    /// The end of the line was replaced by the token.
    Tail,
}

/// How a truncated line differs from its source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truncation {
    /// Which part of the line was cut.
    pub mode: TruncationMode,
    /// Characters of the line's range that are not shown. The token is drawn
    /// at `removed.start`. Empty when only later lines were dropped.
    pub removed: Range<usize>,
    /// The token text.
    pub token: String,
    /// The token's style.
    pub token_attributes: AttributeSet,
    /// Advance width of the token.
    pub token_width: f32,
}

impl Truncation {
    /// Character index the token is drawn at.
    #[must_use]
    pub const fn insertion_point(&self) -> usize {
        self.removed.start
    }
}

/// End of the prefix of `range` that fits in `available` together with a
/// token of `token_width`. Spaces before the cut are dropped as well.
pub(crate) fn cut_tail(
    glyphs: &[Glyph],
    range: Range<usize>,
    available: f32,
    token_width: f32,
) -> usize {
    let visible_end = trim_end(glyphs, range.clone());
    let limit = available - token_width + FIT_TOLERANCE;
    let mut pen = 0.0;
    let mut end = range.start;
    while end < visible_end && pen + glyphs[end].advance <= limit {
        pen += glyphs[end].advance;
        end += 1;
    }
    trim_end(glyphs, range.start..end)
}

/// Start of the suffix of `range` that fits in `available` after a token of
/// `token_width`. Spaces after the cut are dropped as well.
pub(crate) fn cut_head(
    glyphs: &[Glyph],
    range: Range<usize>,
    available: f32,
    token_width: f32,
) -> usize {
    let visible_end = trim_end(glyphs, range.clone());
    let limit = available - token_width + FIT_TOLERANCE;
    let mut pen = 0.0;
    let mut start = visible_end;
    while start > range.start && pen + glyphs[start - 1].advance <= limit {
        pen += glyphs[start - 1].advance;
        start -= 1;
    }
    trim_start(glyphs, start..visible_end)
}

/// The part of `range` to remove so that the head, a token of
/// `token_width`, and the tail fit in `available`. The head gets at most
/// half of the space left for text.
pub(crate) fn cut_middle(
    glyphs: &[Glyph],
    range: Range<usize>,
    available: f32,
    token_width: f32,
) -> Range<usize> {
    let visible_end = trim_end(glyphs, range.clone());
    let budget = available - token_width + FIT_TOLERANCE;

    let mut head_width = 0.0;
    let mut head_end = range.start;
    while head_end < visible_end && head_width + glyphs[head_end].advance <= budget / 2.0 {
        head_width += glyphs[head_end].advance;
        head_end += 1;
    }

    let mut tail_width = 0.0;
    let mut tail_start = visible_end;
    while tail_start > head_end
        && head_width + tail_width + glyphs[tail_start - 1].advance <= budget
    {
        tail_width += glyphs[tail_start - 1].advance;
        tail_start -= 1;
    }

    let removed_start = trim_end(glyphs, range.start..head_end);
    let removed_end = trim_start(glyphs, tail_start..visible_end);
    removed_start..removed_end.max(removed_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars()
            .map(|ch| Glyph {
                ch,
                advance: 10.0,
                run: 0,
            })
            .collect()
    }

    #[test]
    fn test_tail_cut_leaves_room_for_token() {
        let text = glyphs("abcdefghij");
        assert_eq!(cut_tail(&text, 0..10, 50.0, 10.0), 4);
    }

    #[test]
    fn test_tail_cut_drops_spaces_before_token() {
        let text = glyphs("abc defgh");
        assert_eq!(cut_tail(&text, 0..9, 50.0, 10.0), 3);
    }

    #[test]
    fn test_head_cut() {
        let text = glyphs("abcdefghij");
        assert_eq!(cut_head(&text, 0..10, 50.0, 10.0), 6);
    }

    #[test]
    fn test_middle_cut_splits_budget() {
        let text = glyphs("abcdefghij");
        assert_eq!(cut_middle(&text, 0..10, 50.0, 10.0), 2..8);
    }

    #[test]
    fn test_token_wider_than_line_keeps_nothing() {
        let text = glyphs("abc");
        assert_eq!(cut_tail(&text, 0..3, 5.0, 10.0), 0);
        assert_eq!(cut_head(&text, 0..3, 5.0, 10.0), 3);
    }
}
