//! Integration tests for line breaking, truncation, sizing, and hit-testing.

use marklabel_layout::{
    EdgeInsets, FontMetrics, LayoutOptions, LineBreakMode, LineMetrics, Point, Size,
    TextAlignment, TextLayout, TruncationMode, VerticalAlignment, layout,
};
use marklabel_style::{AttributeSet, Color, FontDescriptor, ResolvedText, StyleContext, resolve_markup};

/// Every character advances half the point size; lines are exactly one point
/// size tall. At the default 20pt that is 10 wide and 20 tall.
struct Monospace;

impl FontMetrics for Monospace {
    fn advance(&self, ch: char, font: &FontDescriptor) -> f32 {
        if ch.is_control() { 0.0 } else { font.size / 2.0 }
    }

    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics {
        LineMetrics {
            ascent: font.size * 0.75,
            descent: font.size * 0.25,
            leading: 0.0,
        }
    }
}

fn base_font() -> FontDescriptor {
    FontDescriptor::new("Mono", 20.0)
}

fn resolve(markup: &str) -> ResolvedText {
    let context = StyleContext {
        base: AttributeSet::new(base_font(), Color::BLACK),
        ..StyleContext::default()
    };
    resolve_markup(markup, &context)
}

fn options(width: f32) -> LayoutOptions {
    LayoutOptions {
        base_font: base_font(),
        ..LayoutOptions::new(width)
    }
}

fn lay_out(markup: &str, options: &LayoutOptions) -> (ResolvedText, TextLayout) {
    let resolved = resolve(markup);
    let text_layout = layout(&resolved.runs, options, &Monospace);
    (resolved, text_layout)
}

fn line_texts(resolved: &ResolvedText, text_layout: &TextLayout) -> Vec<String> {
    (0..text_layout.line_count())
        .filter_map(|index| text_layout.line_text(&resolved.plain_text, index))
        .collect()
}

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "expected {expected}, got {actual}");
}

// -----------------------------------------------------------------------------
// Sizing
// -----------------------------------------------------------------------------

#[test]
fn test_empty_text_has_zero_size() {
    let (resolved, text_layout) = lay_out("", &options(100.0));
    assert!(resolved.runs.is_empty());
    assert!(resolved.links.is_empty());
    assert!(text_layout.lines.is_empty());
    assert_eq!(text_layout.size, Size::ZERO);
}

#[test]
fn test_single_line_size() {
    let (_, text_layout) = lay_out("hello", &options(100.0));
    assert_eq!(text_layout.line_count(), 1);
    assert_close(text_layout.size.width, 50.0);
    assert_close(text_layout.size.height, 20.0);
    assert!(!text_layout.truncated);
}

#[test]
fn test_wrapping_stacks_lines() {
    let (resolved, text_layout) = lay_out("aaa bbb ccc", &options(65.0));
    assert_eq!(line_texts(&resolved, &text_layout), vec!["aaa ", "bbb ", "ccc"]);
    let tops: Vec<f32> = text_layout.lines.iter().map(|line| line.y).collect();
    assert_eq!(tops, vec![0.0, 20.0, 40.0]);
    assert_close(text_layout.size.width, 30.0);
    assert_close(text_layout.size.height, 60.0);
}

#[test]
fn test_hard_breaks() {
    let (_, text_layout) = lay_out("a<br>b<br>", &options(100.0));
    let ranges: Vec<_> = text_layout.lines.iter().map(|line| line.range.clone()).collect();
    assert_eq!(ranges, vec![0..1, 2..3, 4..4]);
}

#[test]
fn test_mixed_font_sizes_use_tallest() {
    let (_, text_layout) = lay_out("a<font size=40>b</font>", &options(100.0));
    assert_close(text_layout.lines[0].height, 40.0);
    assert_close(text_layout.lines[0].ascent, 30.0);
    assert_close(text_layout.size.width, 30.0);
}

#[test]
fn test_kerning_adds_to_advance() {
    let (_, text_layout) = lay_out("<kern value=2>ab</kern>", &options(100.0));
    assert_close(text_layout.size.width, 24.0);
}

#[test]
fn test_paragraph_spacing_and_insets() {
    let mut options = options(100.0);
    options.paragraph.line_height_multiple = 1.5;
    options.paragraph.line_spacing = 4.0;
    options.paragraph.insets = EdgeInsets {
        top: 5.0,
        left: 7.0,
        bottom: 3.0,
        right: 1.0,
    };
    let (_, text_layout) = lay_out("a<br>b", &options);
    assert_close(text_layout.lines[0].y, 5.0);
    assert_close(text_layout.lines[1].y, 39.0);
    assert_close(text_layout.lines[0].x, 7.0);
    assert_close(text_layout.size.height, 5.0 + 30.0 + 4.0 + 30.0 + 3.0);
    assert_close(text_layout.size.width, 10.0 + 8.0);
}

#[test]
fn test_first_line_indent() {
    let mut options = options(100.0);
    options.paragraph.first_line_indent = 20.0;
    let (resolved, text_layout) = lay_out("aaaa bbbb", &options);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["aaaa ", "bbbb"]);
    assert_close(text_layout.lines[0].x, 20.0);
    assert_close(text_layout.lines[1].x, 0.0);
    assert_close(text_layout.size.width, 60.0);
}

#[test]
fn test_alignment() {
    let mut options = options(100.0);
    options.paragraph.alignment = TextAlignment::Center;
    let (_, centered) = lay_out("ab", &options);
    assert_close(centered.lines[0].x, 40.0);

    options.paragraph.alignment = TextAlignment::Right;
    let (_, right) = lay_out("ab", &options);
    assert_close(right.lines[0].x, 80.0);
}

#[test]
fn test_vertical_offset() {
    let mut options = options(100.0);
    let (_, centered) = lay_out("ab", &options);
    assert_close(centered.vertical_offset(100.0), 40.0);
    assert_close(centered.vertical_offset(10.0), 0.0);

    options.paragraph.vertical_alignment = VerticalAlignment::Bottom;
    let (_, bottom) = lay_out("ab", &options);
    assert_close(bottom.vertical_offset(100.0), 80.0);

    options.paragraph.vertical_alignment = VerticalAlignment::Top;
    let (_, top) = lay_out("ab", &options);
    assert_close(top.vertical_offset(100.0), 0.0);
}

#[test]
fn test_zero_width_yields_one_empty_line() {
    let (_, text_layout) = lay_out("abc<br>def", &options(0.0));
    assert_eq!(text_layout.line_count(), 1);
    let line = &text_layout.lines[0];
    assert_close(line.width, 0.0);
    assert_eq!(line.truncation.as_ref().map(|t| t.removed.clone()), Some(0..3));
    assert_close(text_layout.size.width, 0.0);
    assert_close(text_layout.size.height, 20.0);
}

#[test]
fn test_negative_width_is_treated_like_zero() {
    let (_, text_layout) = lay_out("abc", &options(-10.0));
    assert_eq!(text_layout.line_count(), 1);
    assert_close(text_layout.size.width, 0.0);
}

// -----------------------------------------------------------------------------
// Truncation
// -----------------------------------------------------------------------------

#[test]
fn test_tail_truncation_with_one_line() {
    let markup = "hello world again";
    let options = options(100.0)
        .with_max_lines(1)
        .with_mode(LineBreakMode::TruncateTail);
    let (resolved, text_layout) = lay_out(markup, &options);

    assert_eq!(text_layout.line_count(), 1);
    let line = &text_layout.lines[0];
    assert!(line.width <= 100.0 + 1e-3);
    let shown = text_layout.line_text(&resolved.plain_text, 0).unwrap_or_default();
    assert_eq!(shown, "hello wor\u{2026}");
    assert!(shown.chars().count() < markup.chars().count());
    assert!(text_layout.truncated);
}

#[test]
fn test_line_limit_truncates_last_line() {
    let options = options(65.0).with_max_lines(2);
    let (resolved, text_layout) = lay_out("aaa bbb ccc ddd", &options);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["aaa ", "bbb\u{2026}"]);
    let last = &text_layout.lines[1];
    assert_close(last.width, 40.0);
    assert_eq!(last.truncation.as_ref().map(|t| t.mode), Some(TruncationMode::Tail));
    assert_eq!(last.truncation.as_ref().map(|t| t.insertion_point()), Some(7));
}

#[test]
fn test_line_limit_not_reached() {
    let options = options(65.0).with_max_lines(3);
    let (_, text_layout) = lay_out("aaa bbb ccc", &options);
    assert_eq!(text_layout.line_count(), 3);
    assert!(text_layout.lines.iter().all(|line| !line.is_truncated()));
    assert!(!text_layout.truncated);
}

#[test]
fn test_zero_line_limit_is_unlimited() {
    let options = options(65.0).with_max_lines(0);
    let (_, text_layout) = lay_out("aaa bbb ccc", &options);
    assert_eq!(text_layout.line_count(), 3);
}

#[test]
fn test_head_truncation() {
    let options = options(50.0).with_mode(LineBreakMode::TruncateHead);
    let (resolved, text_layout) = lay_out("abcdefghij", &options);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["\u{2026}ghij"]);
}

#[test]
fn test_middle_truncation() {
    let options = options(50.0).with_mode(LineBreakMode::TruncateMiddle);
    let (resolved, text_layout) = lay_out("abcdefghij", &options);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["ab\u{2026}ij"]);
}

#[test]
fn test_truncating_modes_show_only_the_first_paragraph() {
    let head = options(100.0)
        .with_max_lines(3)
        .with_mode(LineBreakMode::TruncateHead);
    let (resolved, text_layout) = lay_out("one<br>two", &head);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["one"]);
    assert!(text_layout.truncated);

    let tail = head.with_mode(LineBreakMode::TruncateTail);
    let (resolved, text_layout) = lay_out("one<br>two", &tail);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["one\u{2026}"]);
}

#[test]
fn test_custom_token() {
    let mut options = options(60.0).with_max_lines(1);
    options.truncation_token.text = " more".to_string();
    let (resolved, text_layout) = lay_out("lorem ipsum", &options);
    assert_eq!(line_texts(&resolved, &text_layout), vec!["l more"]);
}

#[test]
fn test_token_takes_style_of_cut_text() {
    let options = options(50.0).with_max_lines(1);
    let (_, text_layout) = lay_out("<b>bold text here</b>", &options);
    let truncation = text_layout.lines[0].truncation.clone();
    assert!(truncation.is_some_and(|t| t.token_attributes.font.bold));
}

// -----------------------------------------------------------------------------
// Hit-testing
// -----------------------------------------------------------------------------

#[test]
fn test_character_index_rounds_to_nearest_boundary() {
    let (_, text_layout) = lay_out("hello world", &options(200.0));
    assert_eq!(text_layout.character_index_at(Point::new(14.0, 5.0)), Some(1));
    assert_eq!(text_layout.character_index_at(Point::new(16.0, 5.0)), Some(2));
    assert_eq!(text_layout.character_index_at(Point::new(500.0, 5.0)), Some(11));
    assert_eq!(text_layout.character_index_at(Point::new(5.0, 25.0)), None);
    assert_eq!(text_layout.character_at(Point::new(16.0, 5.0)), Some(1));
}

#[test]
fn test_hit_test_second_line() {
    let (_, text_layout) = lay_out("aaa bbb", &options(50.0));
    assert_eq!(text_layout.line_index_at(Point::new(0.0, 25.0)), Some(1));
    assert_eq!(text_layout.character_at(Point::new(12.0, 25.0)), Some(5));
}

#[test]
fn test_link_at_point() {
    let (resolved, text_layout) =
        lay_out(r#"click <a href="http://x">here</a> now"#, &options(500.0));
    let link = text_layout.link_at(Point::new(75.0, 10.0), &resolved.links);
    assert_eq!(link.map(|link| link.url.as_str()), Some("http://x"));
    assert!(text_layout.link_at(Point::new(30.0, 10.0), &resolved.links).is_none());
    assert!(text_layout.link_at(Point::new(105.0, 10.0), &resolved.links).is_none());
}

#[test]
fn test_link_on_wrapped_line() {
    let (resolved, text_layout) =
        lay_out(r#"go to <a href="http://x">the page</a>"#, &options(60.0));
    assert_eq!(line_texts(&resolved, &text_layout), vec!["go to ", "the ", "page"]);
    let link = text_layout.link_at(Point::new(15.0, 45.0), &resolved.links);
    assert_eq!(link.map(|link| link.range.clone()), Some(6..14));
}

#[test]
fn test_truncation_token_is_not_a_character() {
    let options = options(50.0).with_mode(LineBreakMode::TruncateHead);
    let (_, text_layout) = lay_out("abcdefghij", &options);
    assert_eq!(text_layout.character_at(Point::new(5.0, 5.0)), None);
    assert_eq!(text_layout.character_at(Point::new(15.0, 5.0)), Some(6));
    assert_eq!(text_layout.character_index_at(Point::new(2.0, 5.0)), Some(0));
}
