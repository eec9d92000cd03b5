//! Label model tests: text, layout caching, link touch states, and sizing.

use marklabel::{
    Color, DEFAULT_ACTIVE_LINK_COLOR, FontDescriptor, FontMetrics, HtmlLabel, LabelConfig,
    LineBreakMode, LineMetrics, LinkDelegate, Point, Size, StyleOverrides, VerticalAlignment,
    bounding_size, height_for_markup,
};
use marklabel::common::warning::{recorded_warnings, warn_once};
use marklabel::style::DEFAULT_LINK_COLOR;

/// Every character is half the font size wide; lines are exactly the font
/// size tall.
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

#[derive(Default)]
struct Recorder {
    selected: Vec<String>,
    held: Vec<String>,
}

impl LinkDelegate for Recorder {
    fn did_select_link(&mut self, url: &str) {
        self.selected.push(url.to_string());
    }

    fn did_hold_link(&mut self, url: &str) {
        self.held.push(url.to_string());
    }
}

/// Characters 10 wide, lines 20 tall.
fn font() -> FontDescriptor {
    FontDescriptor::new("Mono", 20.0)
}

fn label(markup: &str, width: f32) -> HtmlLabel<Monospace> {
    let mut label = HtmlLabel::new(Monospace);
    label.set_config(LabelConfig {
        font: font(),
        ..LabelConfig::default()
    });
    label.set_width(width);
    label.set_text(markup);
    label
}

const CLICK_HERE: &str = r#"click <a href="http://x">here</a> now"#;

/// Inside "here", which spans x = 60..100 on the first line.
fn on_here() -> Point {
    Point::new(70.0, 5.0)
}

#[test]
fn test_text_runs_and_links() {
    let label = label(CLICK_HERE, 500.0);
    assert_eq!(label.text(), CLICK_HERE);
    assert_eq!(label.plain_text(), "click here now");
    let texts: Vec<&str> = label.runs().iter().map(|run| run.text.as_str()).collect();
    assert_eq!(texts, vec!["click ", "here", " now"]);
    assert_eq!(label.links().len(), 1);
    assert_eq!(label.links()[0].url, "http://x");
    assert_eq!(label.links()[0].range, 6..10);
    assert_eq!(label.runs()[1].attributes.color, DEFAULT_LINK_COLOR);
}

#[test]
fn test_empty_label() {
    let mut label = label("", 100.0);
    assert!(label.runs().is_empty());
    assert!(label.links().is_empty());
    assert_eq!(label.size(), Size::ZERO);
    assert!(label.link_at(Point::new(0.0, 0.0)).is_none());
}

#[test]
fn test_link_at_point() {
    let mut label = label(CLICK_HERE, 500.0);
    assert_eq!(label.link_at(on_here()).map(|link| link.url), Some("http://x".to_string()));
    assert!(label.link_at(Point::new(30.0, 5.0)).is_none());
    assert!(label.link_at(Point::new(70.0, 25.0)).is_none());
}

#[test]
fn test_width_change_relayouts() {
    let mut label = label("aaa bbb", 1000.0);
    assert_eq!(label.layout().line_count(), 1);
    label.set_width(50.0);
    assert_eq!(label.layout().line_count(), 2);
    assert_eq!(label.size(), Size::new(30.0, 40.0));
}

#[test]
fn test_config_line_limit() {
    let mut label = label("aaa bbb ccc", 50.0);
    label.set_config(LabelConfig {
        font: font(),
        max_lines: 1,
        ..LabelConfig::default()
    });
    let layout = label.layout();
    assert_eq!(layout.line_count(), 1);
    assert!(layout.truncated);
    assert!(layout.lines[0].is_truncated());
}

#[test]
fn test_view_height_offsets_touch_points() {
    let mut label = label(CLICK_HERE, 500.0);
    assert_eq!(label.config().paragraph.vertical_alignment, VerticalAlignment::Center);
    label.set_view_height(Some(100.0));
    // 20 tall text centered in 100: the line spans y = 40..60.
    assert!(label.link_at(on_here()).is_none());
    assert!(label.link_at(Point::new(70.0, 45.0)).is_some());
}

#[test]
fn test_tap_selects_link() {
    let mut label = label(CLICK_HERE, 500.0);
    let mut delegate = Recorder::default();

    assert!(label.touch_began(on_here()));
    assert_eq!(label.active_link().map(|link| link.range.clone()), Some(6..10));
    assert_eq!(label.runs()[1].attributes.color, DEFAULT_ACTIVE_LINK_COLOR);

    assert!(label.touch_ended(on_here(), &mut delegate));
    assert_eq!(delegate.selected, vec!["http://x"]);
    assert!(label.active_link().is_none());
    assert_eq!(label.runs()[1].attributes.color, DEFAULT_LINK_COLOR);
}

#[test]
fn test_release_elsewhere_does_not_select() {
    let mut label = label(CLICK_HERE, 500.0);
    let mut delegate = Recorder::default();
    assert!(label.touch_began(on_here()));
    assert!(!label.touch_ended(Point::new(5.0, 5.0), &mut delegate));
    assert!(delegate.selected.is_empty());
    assert!(label.active_link().is_none());
}

#[test]
fn test_touch_off_link() {
    let mut label = label(CLICK_HERE, 500.0);
    let mut delegate = Recorder::default();
    assert!(!label.touch_began(Point::new(5.0, 5.0)));
    assert!(label.active_link().is_none());
    assert!(!label.touch_ended(on_here(), &mut delegate));
    assert!(delegate.selected.is_empty());
}

#[test]
fn test_hold_fires_hold() {
    let mut label = label(CLICK_HERE, 500.0);
    let mut delegate = Recorder::default();
    assert!(label.touch_began(on_here()));
    assert!(label.hold(on_here(), &mut delegate));
    assert_eq!(delegate.held, vec!["http://x"]);
    assert!(delegate.selected.is_empty());
    assert!(label.active_link().is_none());
    assert!(!label.hold(Point::new(5.0, 5.0), &mut delegate));
}

#[test]
fn test_cancel_clears_active_link() {
    let mut label = label(CLICK_HERE, 500.0);
    assert!(label.touch_began(on_here()));
    label.touch_cancelled();
    assert!(label.active_link().is_none());
    assert_eq!(label.runs()[1].attributes.color, DEFAULT_LINK_COLOR);
}

#[test]
fn test_set_text_releases_active_link() {
    let mut label = label(CLICK_HERE, 500.0);
    let mut delegate = Recorder::default();
    assert!(label.touch_began(on_here()));
    label.set_text(CLICK_HERE);
    assert!(label.active_link().is_none());
    assert!(!label.touch_ended(on_here(), &mut delegate));
}

#[test]
fn test_set_text_keeps_other_warnings() {
    warn_once("Label", "recorded before set_text");
    let _ = label(r##"<color="#12">x</color>"##, 100.0);
    let warnings = recorded_warnings();
    assert!(warnings.iter().any(|w| w == "[Label] recorded before set_text"));
    assert!(warnings.iter().any(|w| w.contains("#12")));
}

#[test]
fn test_inactive_links_restyled_while_pressing() {
    let gray = Color::rgb(128, 128, 128);
    let mut label = label(r#"<a href="a">one</a> <a href="b">two</a>"#, 500.0);
    label.set_config(LabelConfig {
        font: font(),
        inactive_link: StyleOverrides {
            color: Some(gray),
            ..StyleOverrides::default()
        },
        ..LabelConfig::default()
    });

    assert!(label.touch_began(Point::new(5.0, 5.0)));
    let runs = label.runs();
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].attributes.color, DEFAULT_ACTIVE_LINK_COLOR);
    assert_eq!(runs[1].attributes.color, Color::BLACK);
    assert_eq!(runs[2].attributes.color, gray);

    label.touch_cancelled();
    assert_eq!(label.runs()[2].attributes.color, DEFAULT_LINK_COLOR);
}

#[test]
fn test_delegate_methods_default_to_nothing() {
    struct Ignore;
    impl LinkDelegate for Ignore {}

    let mut label = label(CLICK_HERE, 500.0);
    assert!(label.touch_began(on_here()));
    assert!(label.touch_ended(on_here(), &mut Ignore));
}

#[test]
fn test_truncating_mode_from_config() {
    let mut label = label("abcdefghij", 50.0);
    label.set_config(LabelConfig {
        font: font(),
        line_break_mode: LineBreakMode::TruncateTail,
        truncation_token: "~".to_string(),
        ..LabelConfig::default()
    });
    let plain = label.plain_text().to_string();
    let layout = label.layout();
    assert_eq!(layout.line_text(&plain, 0).as_deref(), Some("abcd~"));
}

#[test]
fn test_bounding_size() {
    assert_eq!(
        bounding_size("", &font(), Size::new(100.0, 0.0), 0, &Monospace),
        Size::ZERO
    );
    assert_eq!(
        bounding_size("aaa bbb ccc", &font(), Size::new(50.0, 0.0), 0, &Monospace),
        Size::new(30.0, 60.0)
    );
    assert_eq!(
        bounding_size("aaa bbb ccc", &font(), Size::new(50.0, 0.0), 2, &Monospace),
        Size::new(40.0, 40.0)
    );
    assert_eq!(
        bounding_size("aaa bbb ccc", &font(), Size::new(50.0, 30.0), 0, &Monospace),
        Size::new(30.0, 30.0)
    );
}

#[test]
fn test_height_for_markup() {
    assert!((height_for_markup("aaa<br>bbb", &font(), 500.0, &Monospace) - 40.0).abs() < 1e-4);
    assert!((height_for_markup("", &font(), 500.0, &Monospace)).abs() < 1e-4);
}
