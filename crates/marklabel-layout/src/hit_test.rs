//! Point to character and link lookup.
//!
//! Points are in layout coordinates: subtract the view's
//! [`vertical_offset`](TextLayout::vertical_offset) first.

use marklabel_style::LinkSpan;

use crate::geometry::Point;
use crate::text_layout::{LineRecord, TextLayout};

/// A horizontal piece of a line: characters or the truncation token.
enum Piece {
    Glyphs(std::ops::Range<usize>),
    Token {
        /// Boundary before the removed text.
        before: usize,
        /// Boundary after the removed text.
        after: usize,
        width: f32,
    },
}

fn pieces(line: &LineRecord) -> Vec<Piece> {
    let (before, after) = line.visible_ranges();
    match &line.truncation {
        None => vec![Piece::Glyphs(before)],
        Some(truncation) => vec![
            Piece::Glyphs(before),
            Piece::Token {
                before: truncation.removed.start,
                after: truncation.removed.end,
                width: truncation.token_width,
            },
            Piece::Glyphs(after),
        ],
    }
}

impl TextLayout {
    /// The line whose band contains `point.y`. Line spacing belongs to the
    /// line above it.
    #[must_use]
    pub fn line_index_at(&self, point: Point) -> Option<usize> {
        let index = self.lines.partition_point(|line| line.y <= point.y).checked_sub(1)?;
        let line = &self.lines[index];
        let is_last = index + 1 == self.lines.len();
        (!is_last || point.y < line.y + line.height).then_some(index)
    }

    /// Nearest character boundary to `point`, as an index into the plain
    /// text: a point over the right half of a character maps to the index
    /// after it.
    ///
    /// Returns `None` above the first line and below the last.
    #[must_use]
    pub fn character_index_at(&self, point: Point) -> Option<usize> {
        let line = &self.lines[self.line_index_at(point)?];
        let x = point.x - line.x;
        let mut pen = 0.0;
        for piece in pieces(line) {
            match piece {
                Piece::Glyphs(range) => {
                    for index in range {
                        let advance = self.advances[index];
                        if x < pen + advance / 2.0 {
                            return Some(index);
                        }
                        pen += advance;
                    }
                }
                Piece::Token {
                    before,
                    after,
                    width,
                } => {
                    if x < pen + width / 2.0 {
                        return Some(before);
                    }
                    pen += width;
                    if x < pen {
                        return Some(after);
                    }
                }
            }
        }
        Some(line.range.end)
    }

    /// The character drawn under `point`, if any. Points over the
    /// truncation token, past either end of a line, or outside every line
    /// have none.
    #[must_use]
    pub fn character_at(&self, point: Point) -> Option<usize> {
        let line = &self.lines[self.line_index_at(point)?];
        let x = point.x - line.x;
        if x < 0.0 {
            return None;
        }
        let mut pen = 0.0;
        for piece in pieces(line) {
            match piece {
                Piece::Glyphs(range) => {
                    for index in range {
                        pen += self.advances[index];
                        if x < pen {
                            return Some(index);
                        }
                    }
                }
                Piece::Token { width, .. } => {
                    pen += width;
                    if x < pen {
                        return None;
                    }
                }
            }
        }
        None
    }

    /// The link drawn under `point`.
    #[must_use]
    pub fn link_at<'a>(&self, point: Point, links: &'a [LinkSpan]) -> Option<&'a LinkSpan> {
        let index = self.character_at(point)?;
        links.iter().find(|link| link.contains(index))
    }
}
