//! Label configuration.
//!
//! Everything about a label except its markup and width. Loaded from JSON by
//! the CLI; every field has a default so a config file only lists what it
//! changes:
//!
//! ```json
//! {
//!   "font": { "family": "Avenir", "size": 15 },
//!   "text_color": "#333333",
//!   "link": { "color": "teal", "underline": "none" },
//!   "line_break_mode": "truncate-tail",
//!   "max_lines": 2
//! }
//! ```

use std::fs;
use std::path::Path;

use marklabel_layout::{LayoutOptions, LineBreakMode, ParagraphStyle, TruncationToken};
use marklabel_style::{
    AttributeSet, Color, FontDescriptor, StyleContext, StyleOverrides, default_link_style,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color of a link while it is pressed.
pub const DEFAULT_ACTIVE_LINK_COLOR: Color = Color::rgb(0, 84, 180);

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path as given.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON or has a field of the wrong type.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Style and layout settings of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Font of text outside any tag.
    pub font: FontDescriptor,
    /// Color of text outside any tag.
    pub text_color: Color,
    /// Default letter spacing.
    pub kerning: f32,
    /// Applied to anchor text.
    pub link: StyleOverrides,
    /// Applied to the pressed link on top of `link`.
    pub active_link: StyleOverrides,
    /// Applied to every other link while one is pressed.
    pub inactive_link: StyleOverrides,
    /// Indent, spacing, insets, and alignment.
    pub paragraph: ParagraphStyle,
    /// Wrapping or single-line truncation.
    pub line_break_mode: LineBreakMode,
    /// Maximum number of lines, 0 for unlimited.
    pub max_lines: usize,
    /// Inserted where text is cut.
    pub truncation_token: String,
    /// Style of the token on top of the base style. Unset, the token is
    /// styled like the text it replaces.
    pub truncation_token_style: Option<StyleOverrides>,
    /// Relative `href`s are resolved against this.
    pub base_url: Option<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            text_color: Color::BLACK,
            kerning: 0.0,
            link: default_link_style(),
            active_link: StyleOverrides {
                color: Some(DEFAULT_ACTIVE_LINK_COLOR),
                ..StyleOverrides::default()
            },
            inactive_link: StyleOverrides::default(),
            paragraph: ParagraphStyle::default(),
            line_break_mode: LineBreakMode::WordWrap,
            max_lines: 0,
            truncation_token: TruncationToken::default().text,
            truncation_token_style: None,
            base_url: None,
        }
    }
}

impl LabelConfig {
    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `json` is malformed or a field has
    /// the wrong type, including colors that do not parse.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Json`] if its contents do not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Attributes of text outside any tag.
    #[must_use]
    pub fn base_attributes(&self) -> AttributeSet {
        AttributeSet {
            kerning: self.kerning,
            ..AttributeSet::new(self.font.clone(), self.text_color)
        }
    }

    /// Resolver input for this configuration.
    #[must_use]
    pub fn style_context(&self) -> StyleContext {
        StyleContext {
            base: self.base_attributes(),
            link: self.link.clone(),
            base_url: self.base_url.clone(),
        }
    }

    /// Layout input for this configuration at `width`.
    #[must_use]
    pub fn layout_options(&self, width: f32) -> LayoutOptions {
        LayoutOptions {
            width,
            max_lines: Some(self.max_lines),
            line_break_mode: self.line_break_mode,
            paragraph: self.paragraph,
            truncation_token: TruncationToken {
                text: self.truncation_token.clone(),
                attributes: self
                    .truncation_token_style
                    .as_ref()
                    .map(|style| style.applied(&self.base_attributes())),
            },
            base_font: self.font.clone(),
        }
    }
}
