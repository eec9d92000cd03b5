//! Laying out styled runs into measured lines.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! Unlike a browser, a label never scrolls: content past the line limit is
//! dropped and the last visible line carries a truncation token instead.

use std::ops::Range;

use marklabel_style::{AttributeSet, StyledRun};
use serde::Serialize;

use crate::geometry::{Rect, Size};
use crate::line_break::{BrokenLine, FIT_TOLERANCE, paragraphs, wrap_paragraph};
use crate::measure::{Glyph, advance, line_extent, measure_runs, trim_end, width_of};
use crate::metrics::FontMetrics;
use crate::paragraph::{LayoutOptions, LineBreakMode, TextAlignment, VerticalAlignment};
use crate::truncation::{Truncation, TruncationMode, cut_head, cut_middle, cut_tail};

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    /// Characters of the plain text the line covers, hanging spaces
    /// included and the hard break excluded.
    pub range: Range<usize>,
    /// Left edge of the first glyph, after insets, indent, and alignment.
    pub x: f32,
    /// Top of the line.
    pub y: f32,
    /// Width of the drawn text, truncation token included and hanging
    /// spaces excluded.
    pub width: f32,
    /// Line height after the line-height multiple.
    pub height: f32,
    /// Largest ascent on the line.
    pub ascent: f32,
    /// Largest descent on the line.
    pub descent: f32,
    /// Set when the line shows a truncation token.
    pub truncation: Option<Truncation>,
}

impl LineRecord {
    /// Whether the line shows a truncation token.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Distance from the top of the layout to the line's baseline.
    #[must_use]
    pub fn baseline(&self) -> f32 {
        self.y + self.ascent
    }

    /// The line's drawn area.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Characters drawn before and after the token. Without truncation the
    /// second range is empty.
    #[must_use]
    pub fn visible_ranges(&self) -> (Range<usize>, Range<usize>) {
        match &self.truncation {
            None => (self.range.clone(), self.range.end..self.range.end),
            Some(truncation) => (
                self.range.start..truncation.removed.start,
                truncation.removed.end..self.range.end,
            ),
        }
    }
}

/// The result of one layout pass.
///
/// Immutable once built. Any change to the text, fonts, width, or options
/// requires a new layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextLayout {
    /// Lines from top to bottom.
    pub lines: Vec<LineRecord>,
    /// Bounding size, insets included.
    pub size: Size,
    /// Placement of the text block in a taller view.
    pub vertical_alignment: VerticalAlignment,
    /// Whether any text is hidden.
    pub truncated: bool,
    /// Advance of every character of the plain text.
    #[serde(skip)]
    pub(crate) advances: Vec<f32>,
}

impl TextLayout {
    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Offset from the top of a view of `view_height` to the top of the
    /// layout. Never negative, so the first line stays visible.
    #[must_use]
    pub fn vertical_offset(&self, view_height: f32) -> f32 {
        let free = (view_height - self.size.height).max(0.0);
        match self.vertical_alignment {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => free / 2.0,
            VerticalAlignment::Bottom => free,
        }
    }

    /// The text drawn on line `index`, truncation token included.
    ///
    /// `plain_text` must be the text the layout was computed from.
    #[must_use]
    pub fn line_text(&self, plain_text: &str, index: usize) -> Option<String> {
        let line = self.lines.get(index)?;
        let (before, after) = line.visible_ranges();
        let slice = |range: Range<usize>| -> String {
            plain_text
                .chars()
                .skip(range.start)
                .take(range.len())
                .collect()
        };
        let mut text = slice(before);
        if let Some(truncation) = &line.truncation {
            text.push_str(&truncation.token);
        }
        text.push_str(&slice(after));
        Some(text)
    }
}

/// Lay out `runs` under `options`.
///
/// Empty text has no lines and a zero size. A width with no room for text
/// yields one empty line whose truncation covers the first paragraph.
#[must_use]
pub fn layout(
    runs: &[StyledRun],
    options: &LayoutOptions,
    metrics: &dyn FontMetrics,
) -> TextLayout {
    let glyphs = measure_runs(runs, metrics);
    if glyphs.is_empty() {
        return TextLayout {
            vertical_alignment: options.paragraph.vertical_alignment,
            ..TextLayout::default()
        };
    }

    let builder = LineBuilder {
        runs,
        glyphs: &glyphs,
        options,
        metrics,
    };
    let paragraphs = paragraphs(&glyphs);
    let (lines, truncated) = if options.content_width() <= 0.0 {
        (vec![builder.collapsed_line(&paragraphs)], true)
    } else if options.line_break_mode.is_single_line() {
        builder.single_line(&paragraphs)
    } else {
        builder.wrapped_lines(&paragraphs)
    };

    builder.place(lines, truncated)
}

/// A line after breaking and truncation, before placement.
struct PendingLine {
    line: BrokenLine,
    truncation: Option<Truncation>,
}

struct LineBuilder<'a> {
    runs: &'a [StyledRun],
    glyphs: &'a [Glyph],
    options: &'a LayoutOptions,
    metrics: &'a dyn FontMetrics,
}

impl LineBuilder<'_> {
    fn indent(&self, line: &BrokenLine) -> f32 {
        if line.starts_paragraph {
            self.options.paragraph.first_line_indent
        } else {
            0.0
        }
    }

    fn attributes_at(&self, index: usize) -> &AttributeSet {
        let index = index.min(self.glyphs.len().saturating_sub(1));
        &self.runs[self.glyphs[index].run].attributes
    }

    /// Text, style, and width of the truncation token, styled like the
    /// character at `style_index` unless the options give it a style.
    fn token(&self, style_index: usize) -> (String, AttributeSet, f32) {
        let token = &self.options.truncation_token;
        let attributes = token
            .attributes
            .clone()
            .unwrap_or_else(|| self.attributes_at(style_index).clone());
        let width = token
            .text
            .chars()
            .map(|ch| advance(ch, &attributes, self.metrics))
            .sum();
        (token.text.clone(), attributes, width)
    }

    /// Width ≤ 0: one empty line standing for the first paragraph.
    fn collapsed_line(&self, paragraphs: &[Range<usize>]) -> PendingLine {
        let first = paragraphs[0].clone();
        PendingLine {
            line: BrokenLine {
                range: first.clone(),
                width: 0.0,
                starts_paragraph: false,
            },
            truncation: Some(Truncation {
                mode: TruncationMode::Tail,
                removed: first.clone(),
                token: String::new(),
                token_attributes: self.attributes_at(first.start).clone(),
                token_width: 0.0,
            }),
        }
    }

    /// Word wrap, then tail-truncate the last permitted line if the line
    /// limit drops content.
    fn wrapped_lines(&self, paragraphs: &[Range<usize>]) -> (Vec<PendingLine>, bool) {
        let width = self.options.content_width();
        let mut lines: Vec<BrokenLine> = paragraphs
            .iter()
            .flat_map(|paragraph| {
                wrap_paragraph(
                    self.glyphs,
                    paragraph.clone(),
                    width,
                    self.options.paragraph.first_line_indent,
                )
            })
            .collect();

        let limit = match self.options.line_limit() {
            Some(limit) if lines.len() > limit => limit,
            _ => {
                let pending = lines
                    .into_iter()
                    .map(|line| PendingLine {
                        line,
                        truncation: None,
                    })
                    .collect();
                return (pending, false);
            }
        };
        lines.truncate(limit);

        let mut pending: Vec<PendingLine> = lines
            .into_iter()
            .map(|line| PendingLine {
                line,
                truncation: None,
            })
            .collect();
        if let Some(last) = pending.last_mut() {
            let available = width - self.indent(&last.line);
            let (line, truncation) = self.cut_line_tail(&last.line, available);
            last.line = line;
            last.truncation = Some(truncation);
        }
        (pending, true)
    }

    /// Tail truncation of `line`; the token is shown even if the line fits.
    fn cut_line_tail(&self, line: &BrokenLine, available: f32) -> (BrokenLine, Truncation) {
        let range = line.range.clone();
        let style_index = trim_end(self.glyphs, range.clone()).max(range.start + 1) - 1;
        let (token, token_attributes, token_width) = self.token(style_index);
        let cut = cut_tail(self.glyphs, range.clone(), available, token_width);
        (
            BrokenLine {
                range: range.clone(),
                width: width_of(self.glyphs, range.start..cut) + token_width,
                starts_paragraph: line.starts_paragraph,
            },
            Truncation {
                mode: TruncationMode::Tail,
                removed: cut..range.end,
                token,
                token_attributes,
                token_width,
            },
        )
    }

    /// Head, middle, and tail modes: only the first paragraph is shown, on
    /// one line, whatever the line limit.
    fn single_line(&self, paragraphs: &[Range<usize>]) -> (Vec<PendingLine>, bool) {
        let first = paragraphs[0].clone();
        let more = paragraphs.len() > 1;
        let mode = self.options.line_break_mode;
        let available =
            self.options.content_width() - self.options.paragraph.first_line_indent;
        let visible_end = trim_end(self.glyphs, first.clone());
        let full_width = width_of(self.glyphs, first.start..visible_end);

        let whole = BrokenLine {
            range: first.clone(),
            width: full_width,
            starts_paragraph: true,
        };
        let fits = full_width <= available + FIT_TOLERANCE;
        if fits && !(mode == LineBreakMode::TruncateTail && more) {
            let pending = PendingLine {
                line: whole,
                truncation: None,
            };
            return (vec![pending], more);
        }

        let pending = match mode {
            LineBreakMode::TruncateHead => {
                let (token, token_attributes, token_width) = self.token(first.start);
                let start = cut_head(self.glyphs, first.clone(), available, token_width);
                PendingLine {
                    line: BrokenLine {
                        width: token_width + width_of(self.glyphs, start..visible_end),
                        ..whole
                    },
                    truncation: Some(Truncation {
                        mode: TruncationMode::Head,
                        removed: first.start..start,
                        token,
                        token_attributes,
                        token_width,
                    }),
                }
            }
            LineBreakMode::TruncateMiddle => {
                let middle = first.start + first.len() / 2;
                let (token, token_attributes, token_width) = self.token(middle);
                let removed = cut_middle(self.glyphs, first.clone(), available, token_width);
                let width = width_of(self.glyphs, first.start..removed.start)
                    + token_width
                    + width_of(self.glyphs, removed.end..visible_end.max(removed.end));
                PendingLine {
                    line: BrokenLine { width, ..whole },
                    truncation: Some(Truncation {
                        mode: TruncationMode::Middle,
                        removed,
                        token,
                        token_attributes,
                        token_width,
                    }),
                }
            }
            LineBreakMode::TruncateTail | LineBreakMode::WordWrap => {
                let (line, truncation) = self.cut_line_tail(&whole, available);
                PendingLine {
                    line,
                    truncation: Some(truncation),
                }
            }
        };
        (vec![pending], true)
    }

    /// Assign positions and heights, and compute the bounding size.
    fn place(&self, lines: Vec<PendingLine>, truncated: bool) -> TextLayout {
        let paragraph = &self.options.paragraph;
        let content_width = self.options.content_width().max(0.0);
        let count = lines.len();
        let mut records = Vec::with_capacity(count);
        let mut y = paragraph.insets.top;
        let mut widest: f32 = 0.0;
        // Unbounded width aligns within the widest line.
        let align_width = if content_width.is_finite() {
            content_width
        } else {
            lines
                .iter()
                .map(|pending| self.indent(&pending.line) + pending.line.width)
                .fold(0.0, f32::max)
        };

        for (index, PendingLine { line, truncation }) in lines.into_iter().enumerate() {
            let extent = {
                let mut runs: Vec<usize> = Vec::new();
                let (before, after) = match &truncation {
                    None => (line.range.clone(), line.range.end..line.range.end),
                    Some(t) => (line.range.start..t.removed.start, t.removed.end..line.range.end),
                };
                for glyph in self.glyphs[before].iter().chain(&self.glyphs[after]) {
                    if runs.last() != Some(&glyph.run) {
                        runs.push(glyph.run);
                    }
                }
                let token = truncation
                    .as_ref()
                    .filter(|t| !t.token.is_empty())
                    .map(|t| &t.token_attributes);
                line_extent(
                    runs.iter()
                        .map(|&run| &self.runs[run].attributes)
                        .chain(token),
                    &self.options.base_font,
                    self.metrics,
                )
            };
            let height = extent.height * paragraph.line_height_multiple;

            let indent = if content_width > 0.0 { self.indent(&line) } else { 0.0 };
            let available = align_width - indent;
            let offset = match paragraph.alignment {
                TextAlignment::Left => 0.0,
                TextAlignment::Center => ((available - line.width) / 2.0).max(0.0),
                TextAlignment::Right => (available - line.width).max(0.0),
            };
            widest = widest.max(indent + line.width);

            records.push(LineRecord {
                range: line.range,
                x: paragraph.insets.left + indent + offset,
                y,
                width: line.width,
                height,
                ascent: extent.ascent,
                descent: extent.descent,
                truncation,
            });

            y += height;
            if index + 1 < count {
                y += paragraph.line_spacing;
            }
        }

        TextLayout {
            lines: records,
            size: Size::new(
                widest.min(content_width) + paragraph.insets.horizontal(),
                y + paragraph.insets.bottom,
            ),
            vertical_alignment: paragraph.vertical_alignment,
            truncated,
            advances: self.glyphs.iter().map(|glyph| glyph.advance).collect(),
        }
    }
}
