//! Per-character advances of a run sequence.

use std::ops::Range;

use marklabel_style::{AttributeSet, FontDescriptor, StyledRun};

use crate::metrics::{FontMetrics, LineMetrics};

/// One character of the plain text with its measured advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Glyph {
    pub ch: char,
    pub advance: f32,
    /// Index of the run the character belongs to.
    pub run: usize,
}

/// Characters of `runs` in order, each advanced by its font plus the run's
/// kerning. A hard break (`'\n'`) has no advance.
pub(crate) fn measure_runs(runs: &[StyledRun], metrics: &dyn FontMetrics) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(runs.last().map_or(0, |run| run.range.end));
    for (index, run) in runs.iter().enumerate() {
        glyphs.extend(run.text.chars().map(|ch| Glyph {
            ch,
            advance: advance(ch, &run.attributes, metrics),
            run: index,
        }));
    }
    glyphs
}

/// Advance of `ch` styled with `attributes`.
pub(crate) fn advance(ch: char, attributes: &AttributeSet, metrics: &dyn FontMetrics) -> f32 {
    if ch == '\n' {
        return 0.0;
    }
    metrics.advance(ch, &attributes.font) + attributes.kerning
}

/// Total advance of `glyphs[range]`.
pub(crate) fn width_of(glyphs: &[Glyph], range: Range<usize>) -> f32 {
    glyphs[range].iter().map(|glyph| glyph.advance).sum()
}

/// Characters a line may break after. U+00A0 binds its neighbours.
pub(crate) fn is_breaking_space(ch: char) -> bool {
    ch != '\u{a0}' && ch != '\n' && ch.is_whitespace()
}

/// End of `range` with trailing breaking spaces removed.
pub(crate) fn trim_end(glyphs: &[Glyph], range: Range<usize>) -> usize {
    let mut end = range.end;
    while end > range.start && is_breaking_space(glyphs[end - 1].ch) {
        end -= 1;
    }
    end
}

/// Start of `range` with leading breaking spaces removed.
pub(crate) fn trim_start(glyphs: &[Glyph], range: Range<usize>) -> usize {
    let mut start = range.start;
    while start < range.end && is_breaking_space(glyphs[start].ch) {
        start += 1;
    }
    start
}

/// Vertical extent of one line before the line-height multiple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineExtent {
    pub ascent: f32,
    pub descent: f32,
    /// Largest `ascent + descent + leading` of any font on the line.
    pub height: f32,
}

/// Vertical extent of a line styled with `attributes`, or with `fallback`
/// when the line is empty.
pub(crate) fn line_extent<'a>(
    attributes: impl IntoIterator<Item = &'a AttributeSet>,
    fallback: &FontDescriptor,
    metrics: &dyn FontMetrics,
) -> LineExtent {
    let fonts: Vec<LineMetrics> = attributes
        .into_iter()
        .map(|set| metrics.line_metrics(&set.font))
        .collect();
    let fonts = if fonts.is_empty() {
        vec![metrics.line_metrics(fallback)]
    } else {
        fonts
    };
    fonts.iter().fold(
        LineExtent {
            ascent: 0.0,
            descent: 0.0,
            height: 0.0,
        },
        |acc, line| LineExtent {
            ascent: acc.ascent.max(line.ascent),
            descent: acc.descent.max(line.descent),
            height: acc.height.max(line.line_height()),
        },
    )
}
