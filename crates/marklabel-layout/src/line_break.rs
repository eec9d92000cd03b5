//! Greedy line breaking.
//!
//! [§ 5 Line Breaking and Word Boundaries](https://www.w3.org/TR/css-text-3/#line-breaking)
//!
//! "When inline-level content is laid out into lines, it is broken across
//! line boxes. Such breaks are called line breaks."

use std::ops::Range;

use crate::measure::{Glyph, is_breaking_space, trim_end, width_of};

/// Slack for accumulated float error when comparing widths.
pub(crate) const FIT_TOLERANCE: f32 = 1e-3;

/// A line produced by the breaker, before vertical placement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BrokenLine {
    /// Characters consumed by the line, hanging spaces included.
    pub range: Range<usize>,
    /// Width of the line without its hanging spaces.
    pub width: f32,
    /// Whether this is the first line of its paragraph.
    pub starts_paragraph: bool,
}

/// [§ 5.1 Line Breaking Details](https://www.w3.org/TR/css-text-3/#line-break-details)
///
/// "A line break is forced at a preserved newline."
///
/// Character ranges of the paragraphs of `glyphs`, without the `'\n'`
/// separators. There is always at least one paragraph; text ending in a
/// hard break ends with an empty paragraph.
pub(crate) fn paragraphs(glyphs: &[Glyph]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (index, glyph) in glyphs.iter().enumerate() {
        if glyph.ch == '\n' {
            ranges.push(start..index);
            start = index + 1;
        }
    }
    ranges.push(start..glyphs.len());
    ranges
}

/// Break one paragraph into lines no wider than `width`.
///
/// [§ 5.2 Breaking Rules for Letters](https://www.w3.org/TR/css-text-3/#word-break-property)
///
/// Soft wrap opportunities exist after breaking spaces. Spaces at the end of
/// a line hang: they stay on that line but do not count toward its width.
///
/// [§ 5.5 Overflow Wrapping](https://www.w3.org/TR/css-text-3/#overflow-wrap-property)
///
/// "An otherwise unbreakable sequence of characters may be broken at an
/// arbitrary point if there are no otherwise-acceptable break points in the
/// line." Every line takes at least one character, so breaking always
/// makes progress.
pub(crate) fn wrap_paragraph(
    glyphs: &[Glyph],
    paragraph: Range<usize>,
    width: f32,
    first_line_indent: f32,
) -> Vec<BrokenLine> {
    let mut lines = Vec::new();
    let mut line_start = paragraph.start;
    // Width through the last non-space character on the line.
    let mut line_width = 0.0;
    // Width through every character consumed so far, spaces included.
    let mut pen = 0.0;
    let mut has_word = false;
    let mut index = paragraph.start;

    let available = |line_start: usize| {
        if line_start == paragraph.start {
            width - first_line_indent
        } else {
            width
        }
    };

    while index < paragraph.end {
        // STEP 1: Spaces hang at the end of the line.
        if is_breaking_space(glyphs[index].ch) {
            pen += glyphs[index].advance;
            index += 1;
            continue;
        }

        // STEP 2: Measure the next word.
        let word_end = (index..paragraph.end)
            .find(|&i| is_breaking_space(glyphs[i].ch))
            .unwrap_or(paragraph.end);
        let word_width = width_of(glyphs, index..word_end);
        let limit = available(line_start) + FIT_TOLERANCE;

        if pen + word_width <= limit {
            pen += word_width;
            line_width = pen;
            has_word = true;
            index = word_end;
            continue;
        }

        // STEP 3: The word does not fit after what is already on the line.
        // Break before it and retry on a fresh line.
        if has_word {
            lines.push(BrokenLine {
                range: line_start..index,
                width: line_width,
                starts_paragraph: line_start == paragraph.start,
            });
            line_start = index;
            line_width = 0.0;
            pen = 0.0;
            has_word = false;
            continue;
        }

        // STEP 4: The word alone is too wide. Take as many characters as
        // fit, at least one when the line is empty.
        let mut end = index;
        while end < word_end && pen + glyphs[end].advance <= limit {
            pen += glyphs[end].advance;
            end += 1;
        }
        if end == line_start {
            end += 1;
        }
        lines.push(BrokenLine {
            range: line_start..end,
            width: width_of(glyphs, line_start..trim_end(glyphs, line_start..end)),
            starts_paragraph: line_start == paragraph.start,
        });
        line_start = end;
        line_width = 0.0;
        pen = 0.0;
        index = end;
    }

    // STEP 5: The rest of the paragraph, possibly empty, is the last line.
    if line_start < paragraph.end || lines.is_empty() {
        lines.push(BrokenLine {
            range: line_start..paragraph.end,
            width: line_width,
            starts_paragraph: line_start == paragraph.start,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars()
            .map(|ch| Glyph {
                ch,
                advance: if ch == '\n' { 0.0 } else { 10.0 },
                run: 0,
            })
            .collect()
    }

    fn ranges(lines: &[BrokenLine]) -> Vec<Range<usize>> {
        lines.iter().map(|line| line.range.clone()).collect()
    }

    #[test]
    fn test_paragraphs_split_on_hard_breaks() {
        assert_eq!(paragraphs(&glyphs("ab\ncd\n")), vec![0..2, 3..5, 6..6]);
        assert_eq!(paragraphs(&[]), vec![0..0]);
    }

    #[test]
    fn test_wraps_at_spaces_with_hanging_whitespace() {
        let text = glyphs("aaa bbb ccc");
        let lines = wrap_paragraph(&text, 0..11, 65.0, 0.0);
        assert_eq!(ranges(&lines), vec![0..4, 4..8, 8..11]);
        assert!(lines.iter().all(|line| (line.width - 30.0).abs() < 1e-4));
    }

    #[test]
    fn test_two_words_fit() {
        let text = glyphs("aaa bbb ccc");
        let lines = wrap_paragraph(&text, 0..11, 70.0, 0.0);
        assert_eq!(ranges(&lines), vec![0..8, 8..11]);
        assert!((lines[0].width - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_word_is_hard_broken() {
        let text = glyphs("abcdefg");
        let lines = wrap_paragraph(&text, 0..7, 30.0, 0.0);
        assert_eq!(ranges(&lines), vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn test_at_least_one_character_per_line() {
        let text = glyphs("abc");
        let lines = wrap_paragraph(&text, 0..3, 5.0, 0.0);
        assert_eq!(ranges(&lines), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_first_line_indent() {
        let text = glyphs("aa bb");
        let lines = wrap_paragraph(&text, 0..5, 50.0, 30.0);
        assert_eq!(ranges(&lines), vec![0..3, 3..5]);
        assert!(lines[0].starts_paragraph);
        assert!(!lines[1].starts_paragraph);
    }

    #[test]
    fn test_empty_paragraph_is_one_empty_line() {
        let lines = wrap_paragraph(&glyphs("a\n"), 2..2, 50.0, 0.0);
        assert_eq!(ranges(&lines), vec![2..2]);
        assert_eq!(lines[0].width, 0.0);
    }
}
