//! Token stream to styled runs.
//!
//! The resolver walks the tokens once, keeping a stack of open tags. Each
//! frame holds the complete [`AttributeSet`] in effect inside that tag, so
//! text always takes the style of the top frame and closing a tag restores
//! the enclosing style by popping.

use std::collections::HashSet;
use std::ops::Range;

use marklabel_common::url::resolve_href;
use marklabel_common::warning::warn_once;
use marklabel_html::{Attribute, Token, tokenize};
use serde::Serialize;

use crate::attributes::{AttributeSet, StyleOverrides, UnderlineStyle};
use crate::color::Color;
use crate::grammar::{InlineKey, Tag, frame_key, is_declaration_list, is_void, parse_declarations};
use crate::links::{LinkExtractor, LinkSpan, find_degraded_anchors, link_target};
use crate::value::parse_font_style;

/// Default link color, the system tint.
pub const DEFAULT_LINK_COLOR: Color = Color::rgb(0, 122, 255);

/// Everything the resolver needs besides the markup.
///
/// Nothing is read from global state: the base style and the link style are
/// passed in here.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleContext {
    /// Style of text outside any tag. Its `kerning` is the label's default
    /// letter spacing.
    pub base: AttributeSet,
    /// Applied to anchor text when the anchor opens.
    pub link: StyleOverrides,
    /// Relative `href`s are resolved against this.
    pub base_url: Option<String>,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            base: AttributeSet::default(),
            link: default_link_style(),
            base_url: None,
        }
    }
}

/// Blue, single underline.
#[must_use]
pub fn default_link_style() -> StyleOverrides {
    StyleOverrides {
        color: Some(DEFAULT_LINK_COLOR),
        underline: Some(UnderlineStyle::Single),
        ..StyleOverrides::default()
    }
}

/// A maximal piece of plain text sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    /// The run's text.
    pub text: String,
    /// Character range of `text` in the plain text.
    pub range: Range<usize>,
    /// Resolved style.
    pub attributes: AttributeSet,
}

/// Output of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedText {
    /// Runs in document order, partitioning `plain_text`.
    pub runs: Vec<StyledRun>,
    /// Link spans sorted by start, never overlapping.
    pub links: Vec<LinkSpan>,
    /// The markup with tags stripped, entities decoded, and whitespace
    /// collapsed. Hard breaks are `'\n'`.
    pub plain_text: String,
}

impl ResolvedText {
    /// True if the markup produced no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty()
    }

    /// Length of the plain text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.runs.last().map_or(0, |run| run.range.end)
    }

    /// The run containing character `index`.
    #[must_use]
    pub fn run_at(&self, index: usize) -> Option<&StyledRun> {
        let position = self.runs.partition_point(|run| run.range.end <= index);
        self.runs.get(position).filter(|run| run.range.contains(&index))
    }

    /// The span of link `id`.
    #[must_use]
    pub fn link(&self, id: usize) -> Option<&LinkSpan> {
        self.links.iter().find(|link| link.id == id)
    }
}

#[derive(Debug)]
struct Frame {
    key: String,
    attributes: AttributeSet,
    preserve_whitespace: bool,
    opens_link: bool,
}

/// Converts a token stream into [`ResolvedText`].
#[derive(Debug)]
pub struct StyleResolver<'a> {
    context: &'a StyleContext,
    stack: Vec<Frame>,
    runs: Vec<StyledRun>,
    plain_text: String,
    len: usize,
    links: LinkExtractor,
    degraded_anchors: HashSet<usize>,
    /// The last character emitted is a space that collapsing may remove.
    trailing_space: bool,
    /// Nothing visible since the start of the text or the last hard break.
    at_line_start: bool,
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver for one pass.
    #[must_use]
    pub fn new(context: &'a StyleContext) -> Self {
        Self {
            context,
            stack: Vec::new(),
            runs: Vec::new(),
            plain_text: String::new(),
            len: 0,
            links: LinkExtractor::new(),
            degraded_anchors: HashSet::new(),
            trailing_space: false,
            at_line_start: true,
        }
    }

    /// Resolve `tokens`. Never fails: unknown tags are stripped, stray close
    /// tags ignored, and invalid values fall back to the inherited style.
    #[must_use]
    pub fn resolve(mut self, tokens: &[Token]) -> ResolvedText {
        self.degraded_anchors = find_degraded_anchors(tokens);

        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => self.handle_start_tag(index, name, attributes, *self_closing),
                Token::EndTag { name } => self.handle_end_tag(name),
                Token::Text { data } => self.append_text(data),
                Token::Comment { .. } => {}
                Token::EndOfFile => break,
            }
        }

        // Unclosed tags close at end of input, innermost first.
        while let Some(frame) = self.stack.pop() {
            if frame.opens_link {
                self.links.close(self.len);
            }
        }
        self.trim_trailing_space();

        ResolvedText {
            links: self.links.finish(self.len),
            runs: self.runs,
            plain_text: self.plain_text,
        }
    }

    fn current_attributes(&self) -> &AttributeSet {
        self.stack
            .last()
            .map_or(&self.context.base, |frame| &frame.attributes)
    }

    fn preserves_whitespace(&self) -> bool {
        self.stack.last().is_some_and(|frame| frame.preserve_whitespace)
    }

    fn handle_start_tag(
        &mut self,
        index: usize,
        name: &str,
        attributes: &[Attribute],
        self_closing: bool,
    ) {
        let tag = Tag::from_name(name)
            .filter(|tag| *tag != Tag::Link || !self.degraded_anchors.contains(&index));

        if tag == Some(Tag::Br) {
            self.append_line_break();
            return;
        }
        if self_closing || is_void(name) {
            return;
        }

        let mut resolved = self.current_attributes().clone();
        let mut opens_link = false;
        if let Some(tag) = tag {
            tag.apply_implied(&mut resolved);
            if tag == Tag::Link
                && let Some(href) = link_target(name, attributes)
            {
                let url = resolve_href(href, self.context.base_url.as_deref());
                resolved.link = Some(self.links.open(url, self.len));
                self.context.link.apply_to(&mut resolved);
                opens_link = true;
            }
            apply_inline_attributes(tag, name, attributes, &mut resolved);
        }

        let preserve_whitespace = tag == Some(Tag::Pre) || self.preserves_whitespace();
        self.stack.push(Frame {
            key: frame_key(name),
            attributes: resolved,
            preserve_whitespace,
            opens_link,
        });
    }

    fn handle_end_tag(&mut self, name: &str) {
        let key = frame_key(name);
        let Some(position) = self.stack.iter().rposition(|frame| frame.key == key) else {
            return;
        };
        for frame in self.stack.drain(position..).rev() {
            if frame.opens_link {
                self.links.close(self.len);
            }
        }
    }

    fn append_text(&mut self, data: &str) {
        let mut visible = String::with_capacity(data.len());
        if self.preserves_whitespace() {
            visible.push_str(data);
            if let Some(last) = data.chars().last() {
                self.trailing_space = false;
                self.at_line_start = last == '\n';
            }
        } else {
            for c in data.chars() {
                if is_collapsible_whitespace(c) {
                    if self.at_line_start || self.trailing_space {
                        continue;
                    }
                    visible.push(' ');
                    self.trailing_space = true;
                } else {
                    visible.push(c);
                    self.trailing_space = false;
                    self.at_line_start = false;
                }
            }
        }
        let attributes = self.current_attributes().clone();
        self.push_run(&visible, attributes);
    }

    fn append_line_break(&mut self) {
        self.trim_trailing_space();
        let attributes = self.current_attributes().clone();
        self.push_run("\n", attributes);
        self.at_line_start = true;
    }

    fn push_run(&mut self, text: &str, attributes: AttributeSet) {
        if text.is_empty() {
            return;
        }
        let count = text.chars().count();
        let range = self.len..self.len + count;
        self.plain_text.push_str(text);
        self.len += count;

        if let Some(last) = self.runs.last_mut()
            && last.attributes == attributes
        {
            last.text.push_str(text);
            last.range.end = range.end;
            return;
        }
        self.runs.push(StyledRun {
            text: text.to_string(),
            range,
            attributes,
        });
    }

    /// Drop a collapsible space right before a hard break or the end of text.
    fn trim_trailing_space(&mut self) {
        if !self.trailing_space {
            return;
        }
        self.trailing_space = false;
        let _ = self.plain_text.pop();
        self.len -= 1;
        if let Some(last) = self.runs.last_mut() {
            let _ = last.text.pop();
            last.range.end -= 1;
            if last.text.is_empty() {
                let _ = self.runs.pop();
            }
        }
        self.links.clamp(self.len);
    }
}

/// HTML "ASCII whitespace". U+00A0 is deliberately absent.
const fn is_collapsible_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

fn apply_inline_attributes(
    tag: Tag,
    tag_name: &str,
    attributes: &[Attribute],
    resolved: &mut AttributeSet,
) {
    for attribute in attributes {
        let (name, value) = (attribute.name.as_str(), attribute.value.as_str());
        if tag == Tag::Link && (name == "href" || name == tag_name) {
            continue;
        }
        if name == "style" {
            apply_style_attribute(tag_name, value, resolved);
            continue;
        }
        if let Some(key) = tag.attribute_key(name) {
            apply_key(key, tag_name, value, resolved);
        }
    }
}

fn apply_style_attribute(tag_name: &str, style: &str, resolved: &mut AttributeSet) {
    if !is_declaration_list(style) {
        match parse_font_style(style) {
            Ok(font_style) => resolved.font.apply_style(font_style),
            Err(err) => warn_once("Style", &format!("<{tag_name}>: {err}")),
        }
        return;
    }
    for (key, value) in parse_declarations(style) {
        if let Ok(key) = key.parse::<InlineKey>() {
            apply_key(key, tag_name, value, resolved);
        }
    }
}

fn apply_key(key: InlineKey, tag_name: &str, value: &str, resolved: &mut AttributeSet) {
    if let Err(err) = key.apply(value, resolved) {
        warn_once("Style", &format!("<{tag_name}> {key}: {err}, keeping inherited value"));
    }
}

/// Tokenize and resolve `markup` in one call.
#[must_use]
pub fn resolve_markup(markup: &str, context: &StyleContext) -> ResolvedText {
    let tokens = tokenize(markup);
    StyleResolver::new(context).resolve(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(markup: &str) -> ResolvedText {
        resolve_markup(markup, &StyleContext::default())
    }

    #[test]
    fn test_collapses_whitespace_across_tags() {
        let text = resolve("  a \n\t <b> b </b>  c  ");
        assert_eq!(text.plain_text, "a b c");
    }

    #[test]
    fn test_line_break_trims_surrounding_spaces() {
        let text = resolve("one  <br>  two");
        assert_eq!(text.plain_text, "one\ntwo");
    }

    #[test]
    fn test_pre_keeps_whitespace() {
        let text = resolve("a<pre>  x\n  y</pre>");
        assert_eq!(text.plain_text, "a  x\n  y");
    }

    #[test]
    fn test_trim_removes_emptied_run() {
        let text = resolve("a<b> </b>");
        assert_eq!(text.plain_text, "a");
        assert_eq!(text.runs.len(), 1);
        assert_eq!(text.runs[0].range, 0..1);
    }

    #[test]
    fn test_run_lookup() {
        let text = resolve("ab<b>cd</b>");
        assert_eq!(text.run_at(1).map(|run| run.text.as_str()), Some("ab"));
        assert_eq!(text.run_at(2).map(|run| run.text.as_str()), Some("cd"));
        assert!(text.run_at(4).is_none());
        assert_eq!(text.char_len(), 4);
    }
}
