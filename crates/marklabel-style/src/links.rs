//! Link spans and anchor bookkeeping.
//!
//! The extractor only owns ranges and targets. How a link looks comes from
//! the resolver (the context's link overrides) and, for touch states, from
//! [`restyle_links`].

use std::collections::HashSet;
use std::ops::Range;

use marklabel_html::{Attribute, Token};
use serde::Serialize;

use crate::attributes::{LinkRef, StyleOverrides};
use crate::grammar::{Tag, frame_key, is_void};
use crate::resolver::StyledRun;

/// A clickable range of the plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSpan {
    /// Character range in the plain text. Never empty.
    pub range: Range<usize>,
    /// Resolved link target.
    pub url: String,
    /// Matches [`LinkRef::id`] on the runs inside the span.
    pub id: usize,
}

impl LinkSpan {
    /// Whether the character at `index` belongs to this link.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }
}

#[derive(Debug)]
struct OpenLink {
    id: usize,
    url: String,
    start: usize,
}

/// Records anchor start offsets and closes them into [`LinkSpan`]s.
///
/// At most one anchor is open at a time: anchors that contain another anchor
/// are found up front by [`find_degraded_anchors`] and never opened.
#[derive(Debug, Default)]
pub struct LinkExtractor {
    open: Option<OpenLink>,
    spans: Vec<LinkSpan>,
    next_id: usize,
}

impl LinkExtractor {
    /// Create an extractor with no links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an anchor at plain-text offset `start`.
    ///
    /// An anchor still open is closed at `start` first.
    pub fn open(&mut self, url: String, start: usize) -> LinkRef {
        self.close(start);
        let id = self.next_id;
        self.next_id += 1;
        self.open = Some(OpenLink {
            id,
            url: url.clone(),
            start,
        });
        LinkRef { id, href: url }
    }

    /// Close the open anchor at plain-text offset `end`. Empty links are dropped.
    pub fn close(&mut self, end: usize) {
        let Some(link) = self.open.take() else {
            return;
        };
        if end > link.start {
            self.spans.push(LinkSpan {
                range: link.start..end,
                url: link.url,
                id: link.id,
            });
        }
    }

    /// The plain text was shortened to `len` characters.
    pub fn clamp(&mut self, len: usize) {
        if let Some(link) = &mut self.open {
            link.start = link.start.min(len);
        }
        for span in &mut self.spans {
            span.range.start = span.range.start.min(len);
            span.range.end = span.range.end.min(len);
        }
        self.spans.retain(|span| !span.range.is_empty());
    }

    /// Close anything still open at `len` and return the spans sorted by start.
    #[must_use]
    pub fn finish(mut self, len: usize) -> Vec<LinkSpan> {
        self.close(len);
        self.spans.sort_by_key(|span| span.range.start);
        self.spans
    }
}

/// `href`, or the short form `<a="...">`. A blank target is no target.
pub(crate) fn link_target<'t>(name: &str, attributes: &'t [Attribute]) -> Option<&'t str> {
    attributes
        .iter()
        .find(|attr| attr.name == "href")
        .or_else(|| attributes.iter().find(|attr| attr.name == name))
        .map(|attr| attr.value.as_str())
        .filter(|target| !target.trim().is_empty())
}

/// Indices (into `tokens`) of anchor start tags that contain another anchor.
///
/// Nested anchors are not supported: the innermost anchor is honored and
/// every anchor around it degrades to plain wrapping text. Only tags with a
/// link target count as anchors. Open and close tags are matched exactly the
/// way the resolver matches them.
#[must_use]
pub fn find_degraded_anchors(tokens: &[Token]) -> HashSet<usize> {
    let mut degraded = HashSet::new();
    // (frame key, token index of an anchor start tag)
    let mut stack: Vec<(String, Option<usize>)> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if *self_closing || is_void(name) {
                    continue;
                }
                let is_anchor = Tag::from_name(name) == Some(Tag::Link)
                    && link_target(name, attributes).is_some();
                if is_anchor {
                    degraded.extend(stack.iter().filter_map(|(_, anchor)| *anchor));
                }
                stack.push((frame_key(name), is_anchor.then_some(index)));
            }
            Token::EndTag { name } => {
                let key = frame_key(name);
                if let Some(position) = stack.iter().rposition(|(open, _)| *open == key) {
                    stack.truncate(position);
                }
            }
            Token::Text { .. } | Token::Comment { .. } | Token::EndOfFile => {}
        }
    }
    degraded
}

/// Apply `overrides` to every run of link `link_id`.
///
/// Used by views to draw the active (pressed) state of one link. The input
/// runs are not modified; adjacent runs that become identical are merged.
#[must_use]
pub fn restyle_links(
    runs: &[StyledRun],
    link_id: usize,
    overrides: &StyleOverrides,
) -> Vec<StyledRun> {
    restyle_where(runs, overrides, |link| link.id == link_id)
}

/// Apply `overrides` to the runs of every link except `link_id`.
///
/// Used for the inactive state while another link is pressed.
#[must_use]
pub fn restyle_other_links(
    runs: &[StyledRun],
    link_id: usize,
    overrides: &StyleOverrides,
) -> Vec<StyledRun> {
    restyle_where(runs, overrides, |link| link.id != link_id)
}

fn restyle_where(
    runs: &[StyledRun],
    overrides: &StyleOverrides,
    matches: impl Fn(&LinkRef) -> bool,
) -> Vec<StyledRun> {
    let mut restyled: Vec<StyledRun> = Vec::with_capacity(runs.len());
    for run in runs {
        let attributes = match &run.attributes.link {
            Some(link) if matches(link) => overrides.applied(&run.attributes),
            _ => run.attributes.clone(),
        };
        match restyled.last_mut() {
            Some(last) if last.attributes == attributes && last.range.end == run.range.start => {
                last.text.push_str(&run.text);
                last.range.end = run.range.end;
            }
            _ => restyled.push(StyledRun {
                text: run.text.clone(),
                range: run.range.clone(),
                attributes,
            }),
        }
    }
    restyled
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklabel_html::tokenize;

    #[test]
    fn test_empty_link_is_dropped() {
        let mut links = LinkExtractor::new();
        let _ = links.open("http://x".into(), 3);
        links.close(3);
        assert!(links.finish(3).is_empty());
    }

    #[test]
    fn test_clamp_drops_spans_that_become_empty() {
        let mut links = LinkExtractor::new();
        let _ = links.open("http://a".into(), 0);
        links.close(2);
        let _ = links.open("http://b".into(), 2);
        links.close(3);
        links.clamp(2);
        let spans = links.finish(2);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 0..2);
    }

    #[test]
    fn test_outer_anchor_is_degraded() {
        let tokens = tokenize(r#"<a href="o">x <a href="i">y</a> z</a><a href="n">w</a>"#);
        let degraded = find_degraded_anchors(&tokens);
        assert_eq!(degraded, HashSet::from([0]));
    }

    #[test]
    fn test_targetless_anchor_does_not_degrade() {
        let tokens = tokenize(r#"<a href="o">x <a name="n">y</a> <a href=" ">z</a></a>"#);
        assert!(find_degraded_anchors(&tokens).is_empty());
    }

    #[test]
    fn test_self_closing_anchor_does_not_degrade() {
        let tokens = tokenize(r#"<a href="o">x <a href="i"/> z</a>"#);
        assert!(find_degraded_anchors(&tokens).is_empty());
    }
}
