use core::fmt;

use serde::Serialize;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Attribute value with character references decoded.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Tokens handed from the tokenizer to the style resolver.
///
/// Adjacent character tokens are coalesced into a single [`Token::Text`], so
/// consumers see one text token between two tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// An opening tag such as `<a href="...">` or `<br/>`.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Attributes in source order, duplicates removed (first wins).
        attributes: Vec<Attribute>,
        /// "a self-closing flag"
        self_closing: bool,
    },

    /// A closing tag such as `</b>`. Attributes on end tags are dropped.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },

    /// Literal text with character references decoded. Whitespace is kept
    /// verbatim; collapsing is the consumer's job.
    Text {
        /// The decoded text.
        data: String,
    },

    /// `<!-- ... -->`, `<!DOCTYPE ...>`, `<?...>` and other bogus comments.
    Comment {
        /// Comment body without delimiters.
        data: String,
    },

    /// End of input. Always the last token in the stream.
    EndOfFile,
}

impl Token {
    /// Create a new start tag token with an empty name.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    /// Create a new end tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    /// Look up an attribute value on a start tag by (lowercase) name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::StartTag { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            _ => None,
        }
    }

    /// Whether this is a start tag with the self-closing flag set.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        matches!(
            self,
            Self::StartTag {
                self_closing: true,
                ..
            }
        )
    }

    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name } = self {
            name.push(c);
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self, name: &str) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::new(name, String::new()));
        }
    }

    pub(super) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.name.push(c);
        }
    }

    pub(super) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value.push(c);
        }
    }

    pub(super) fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// Drop attributes whose name already appeared earlier on the tag and
    /// return the names that were dropped.
    ///
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    /// "If there is already an attribute on the token with the exact same name,
    /// then this is a duplicate-attribute parse error and the new attribute
    /// must be removed from the token."
    pub(super) fn remove_duplicate_attributes(&mut self) -> Vec<String> {
        let mut dropped = Vec::new();
        if let Self::StartTag { attributes, .. } = self {
            let mut kept: Vec<Attribute> = Vec::with_capacity(attributes.len());
            for attr in attributes.drain(..) {
                if kept.iter().any(|k| k.name == attr.name) {
                    dropped.push(attr.name);
                } else {
                    kept.push(attr);
                }
            }
            *attributes = kept;
        }
        dropped
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, "/")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { data } => write!(f, "{data:?}"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
