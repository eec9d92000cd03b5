//! Sizing without a label instance, for layout passes that need the height
//! of many labels up front (list rows, for example).

use marklabel_layout::{FontMetrics, Size, TextLayout, layout};
use marklabel_style::{FontDescriptor, resolve_markup};

use crate::config::LabelConfig;

/// Lay out `markup` under `config` at `width`.
#[must_use]
pub fn layout_markup(
    markup: &str,
    config: &LabelConfig,
    width: f32,
    metrics: &dyn FontMetrics,
) -> TextLayout {
    let resolved = resolve_markup(markup, &config.style_context());
    layout(&resolved.runs, &config.layout_options(width), metrics)
}

/// Size `markup` would take in `font` within `constraint`, showing at most
/// `max_lines` lines (0 for unlimited).
///
/// A constraint height that is positive and finite caps the returned height;
/// otherwise the height is unbounded. Empty markup measures `(0, 0)`.
#[must_use]
pub fn bounding_size(
    markup: &str,
    font: &FontDescriptor,
    constraint: Size,
    max_lines: usize,
    metrics: &dyn FontMetrics,
) -> Size {
    let config = LabelConfig {
        font: font.clone(),
        max_lines,
        ..LabelConfig::default()
    };
    let size = layout_markup(markup, &config, constraint.width, metrics).size;
    if constraint.height > 0.0 && constraint.height.is_finite() {
        Size::new(size.width, size.height.min(constraint.height))
    } else {
        size
    }
}

/// Height `markup` needs in `font` at `width`, with no line limit.
#[must_use]
pub fn height_for_markup(
    markup: &str,
    font: &FontDescriptor,
    width: f32,
    metrics: &dyn FontMetrics,
) -> f32 {
    bounding_size(markup, font, Size::new(width, 0.0), 0, metrics).height
}
