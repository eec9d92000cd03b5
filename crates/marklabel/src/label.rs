//! The stateful label model.
//!
//! An [`HtmlLabel`] owns markup, configuration, and width, and keeps the one
//! current layout derived from them. Setters drop the layout; the next read
//! recomputes it from scratch. Mutation takes `&mut self`, so a layout can
//! never be read while a new one is being built. Moving a label to another
//! thread requires its font metrics to be `Send`.
//!
//! Touch handling follows a press/release cycle on one link:
//!
//! ```text
//! touch_began ──► active link ──► touch_ended over the same link ──► did_select_link
//!                      │
//!                      ├──► hold ──► did_hold_link
//!                      └──► touch_cancelled
//! ```

use marklabel_layout::{
    ApproximateFontMetrics, FontMetrics, LayoutOptions, Point, Size, TextLayout, layout,
};
use marklabel_style::{
    LinkSpan, ResolvedText, StyledRun, resolve_markup, restyle_links, restyle_other_links,
};

use crate::config::LabelConfig;

/// Receives link activations from a label.
///
/// Both methods do nothing by default, so a consumer implements only what it
/// handles.
pub trait LinkDelegate {
    /// A link was tapped: pressed and released over the same link.
    fn did_select_link(&mut self, _url: &str) {}

    /// A link was pressed and held.
    fn did_hold_link(&mut self, _url: &str) {}
}

/// A rich text label: markup in, styled runs, links, and lines out.
#[derive(Debug)]
pub struct HtmlLabel<M = ApproximateFontMetrics> {
    markup: String,
    config: LabelConfig,
    width: f32,
    view_height: Option<f32>,
    metrics: M,
    resolved: ResolvedText,
    /// Runs with the active and inactive link styles applied.
    display_runs: Vec<StyledRun>,
    active_link: Option<usize>,
    layout: Option<TextLayout>,
}

impl Default for HtmlLabel {
    fn default() -> Self {
        Self::new(ApproximateFontMetrics)
    }
}

impl<M: FontMetrics> HtmlLabel<M> {
    /// An empty label with the default configuration, unlimited width, and
    /// `metrics` for measurement.
    #[must_use]
    pub fn new(metrics: M) -> Self {
        Self {
            markup: String::new(),
            config: LabelConfig::default(),
            width: f32::INFINITY,
            view_height: None,
            metrics,
            resolved: ResolvedText::default(),
            display_runs: Vec::new(),
            active_link: None,
            layout: None,
        }
    }

    /// Replace the markup. Any pressed link is released without firing.
    pub fn set_text(&mut self, markup: impl Into<String>) {
        self.markup = markup.into();
        self.resolve();
    }

    /// Replace the configuration. Styles, links, and layout are rebuilt.
    pub fn set_config(&mut self, config: LabelConfig) {
        self.config = config;
        self.resolve();
    }

    /// Set the available width, insets included.
    pub fn set_width(&mut self, width: f32) {
        if self.width.to_bits() != width.to_bits() {
            self.width = width;
            self.layout = None;
        }
    }

    /// Set the height of the view the label is drawn in, for vertical
    /// alignment of touch points. `None` pins the text to the top.
    pub const fn set_view_height(&mut self, height: Option<f32>) {
        self.view_height = height;
    }

    /// The markup as set.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.markup
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// The available width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// The markup with tags stripped and entities decoded.
    #[must_use]
    pub fn plain_text(&self) -> &str {
        &self.resolved.plain_text
    }

    /// Styled runs to draw, including the pressed-link state.
    #[must_use]
    pub fn runs(&self) -> &[StyledRun] {
        &self.display_runs
    }

    /// Links in text order.
    #[must_use]
    pub fn links(&self) -> &[LinkSpan] {
        &self.resolved.links
    }

    /// The pressed link, if any.
    #[must_use]
    pub fn active_link(&self) -> Option<&LinkSpan> {
        self.resolved.link(self.active_link?)
    }

    /// Options the layout is computed with.
    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        self.config.layout_options(self.width)
    }

    /// The current layout, computed if any input changed since the last call.
    pub fn layout(&mut self) -> &TextLayout {
        self.current().0
    }

    /// Bounding size of the current layout.
    pub fn size(&mut self) -> Size {
        self.layout().size
    }

    /// The link drawn under `point`, in view coordinates.
    pub fn link_at(&mut self, point: Point) -> Option<LinkSpan> {
        let view_height = self.view_height;
        let (text_layout, resolved) = self.current();
        let offset = view_height.map_or(0.0, |height| text_layout.vertical_offset(height));
        text_layout
            .link_at(Point::new(point.x, point.y - offset), &resolved.links)
            .cloned()
    }

    /// Start a press at `point`. Returns whether it landed on a link, which
    /// then becomes active.
    pub fn touch_began(&mut self, point: Point) -> bool {
        let id = self.link_at(point).map(|link| link.id);
        self.set_active_link(id);
        id.is_some()
    }

    /// End a press at `point`. If it is released over the link it began on,
    /// the delegate is told and `true` is returned.
    pub fn touch_ended(&mut self, point: Point, delegate: &mut dyn LinkDelegate) -> bool {
        let Some(active) = self.active_link else {
            return false;
        };
        let released_on = self.link_at(point);
        self.set_active_link(None);
        match released_on {
            Some(link) if link.id == active => {
                delegate.did_select_link(&link.url);
                true
            }
            _ => false,
        }
    }

    /// A press held at `point`. Fires `did_hold_link` for the link under it
    /// and releases the active link.
    pub fn hold(&mut self, point: Point, delegate: &mut dyn LinkDelegate) -> bool {
        let held = self.link_at(point);
        self.set_active_link(None);
        held.is_some_and(|link| {
            delegate.did_hold_link(&link.url);
            true
        })
    }

    /// Abandon a press without firing.
    pub fn touch_cancelled(&mut self) {
        self.set_active_link(None);
    }

    fn resolve(&mut self) {
        self.resolved = resolve_markup(&self.markup, &self.config.style_context());
        self.active_link = None;
        self.restyle();
    }

    fn set_active_link(&mut self, id: Option<usize>) {
        if self.active_link != id {
            self.active_link = id;
            self.restyle();
        }
    }

    /// Rebuild the display runs. Active styles can change fonts, so the
    /// layout is dropped too.
    fn restyle(&mut self) {
        self.display_runs = match self.active_link {
            None => self.resolved.runs.clone(),
            Some(id) => {
                let active = restyle_links(&self.resolved.runs, id, &self.config.active_link);
                if self.config.inactive_link.is_empty() {
                    active
                } else {
                    restyle_other_links(&active, id, &self.config.inactive_link)
                }
            }
        };
        self.layout = None;
    }

    fn current(&mut self) -> (&TextLayout, &ResolvedText) {
        let options = self.layout_options();
        let runs = &self.display_runs;
        let metrics = &self.metrics;
        let text_layout = self
            .layout
            .get_or_insert_with(|| layout(runs, &options, metrics));
        (text_layout, &self.resolved)
    }
}
