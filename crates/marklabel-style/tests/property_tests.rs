//! Property tests for the run invariants of the style resolver.

use marklabel_style::{ResolvedText, StyleContext, resolve_markup};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: &[&str] = &["b", "i", "u", "s", "strong", "em", "span", "font", "blink", "a"];
const WORDS: &[&str] = &["alpha", "é", "x", "42", "&amp;", "&lt;", "日本", "&#x41;"];

/// One piece of generated markup.
#[derive(Debug, Clone)]
enum Piece {
    Open(&'static str),
    Close(&'static str),
    Word(&'static str),
    Space,
    Break,
}

impl Piece {
    fn render(&self) -> String {
        match self {
            Self::Open("a") => r#"<a href="http://x">"#.to_string(),
            Self::Open("font") => r##"<font color="#f00" size=20>"##.to_string(),
            Self::Open(name) => format!("<{name}>"),
            Self::Close(name) => format!("</{name}>"),
            Self::Word(word) => (*word).to_string(),
            Self::Space => " \n ".to_string(),
            Self::Break => "<br>".to_string(),
        }
    }

    fn decoded(&self) -> &'static str {
        match self {
            Self::Word("&amp;") => "&",
            Self::Word("&lt;") => "<",
            Self::Word("&#x41;") => "A",
            Self::Word(word) => word,
            Self::Open(_) | Self::Close(_) | Self::Space | Self::Break => "",
        }
    }
}

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        let pick = |g: &mut Gen, from: &'static [&'static str]| {
            g.choose(from).copied().unwrap_or("x")
        };
        match u8::arbitrary(g) % 5 {
            0 => Self::Open(pick(g, TAGS)),
            1 => Self::Close(pick(g, TAGS)),
            2 => Self::Space,
            3 if bool::arbitrary(g) => Self::Break,
            _ => Self::Word(pick(g, WORDS)),
        }
    }
}

#[derive(Debug, Clone)]
struct Markup(Vec<Piece>);

impl Markup {
    fn render(&self) -> String {
        self.0.iter().map(Piece::render).collect()
    }
}

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(Vec::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

fn resolve(markup: &str) -> ResolvedText {
    resolve_markup(markup, &StyleContext::default())
}

#[quickcheck]
fn test_runs_concatenate_to_plain_text(markup: Markup) -> bool {
    let resolved = resolve(&markup.render());
    let joined: String = resolved.runs.iter().map(|run| run.text.as_str()).collect();
    joined == resolved.plain_text
}

#[quickcheck]
fn test_runs_partition_plain_text(markup: Markup) -> bool {
    let resolved = resolve(&markup.render());
    let mut expected_start = 0;
    for run in &resolved.runs {
        if run.range.start != expected_start
            || run.range.is_empty()
            || run.text.chars().count() != run.range.len()
        {
            return false;
        }
        expected_start = run.range.end;
    }
    expected_start == resolved.plain_text.chars().count()
}

#[quickcheck]
fn test_adjacent_runs_differ(markup: Markup) -> bool {
    let resolved = resolve(&markup.render());
    resolved
        .runs
        .windows(2)
        .all(|pair| pair[0].attributes != pair[1].attributes)
}

#[quickcheck]
fn test_plain_text_strips_tags_and_decodes(markup: Markup) -> bool {
    let resolved = resolve(&markup.render());
    let visible: String = resolved
        .plain_text
        .chars()
        .filter(|c| !matches!(c, ' ' | '\n'))
        .collect();
    let expected: String = markup.0.iter().map(Piece::decoded).collect();
    visible == expected
}

#[quickcheck]
fn test_resolution_is_idempotent(markup: Markup) -> bool {
    let source = markup.render();
    resolve(&source) == resolve(&source)
}

#[quickcheck]
fn test_links_are_sorted_and_disjoint(markup: Markup) -> bool {
    let resolved = resolve(&markup.render());
    let len = resolved.plain_text.chars().count();
    resolved.links.iter().all(|link| !link.range.is_empty() && link.range.end <= len)
        && resolved
            .links
            .windows(2)
            .all(|pair| pair[0].range.end <= pair[1].range.start)
}
