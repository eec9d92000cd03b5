//! HTML-subset tokenizer for marklabel.
//!
//! # Scope
//!
//! This crate implements a single-pass tokenizer modelled on
//! [WHATWG § 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//! - Data, tag open, tag name, and attribute states
//! - Comments and bogus comments (dropped from text by consumers)
//! - Named and numeric character references, in text and attribute values
//! - The label-specific short form `<color="#f00">`, which becomes an
//!   attribute named after the tag
//!
//! The tokenizer never fails. Malformed constructs are reported through
//! [`marklabel_common::warning`] and recorded as [`ParseIssue`]s; a tag that
//! is still open at end of input is emitted as literal text.
//!
//! # Not Implemented
//!
//! - Tree construction (consumers keep their own stack of open tags)
//! - RCDATA, RAWTEXT, and script data states
//! - DOCTYPE tokens (treated as bogus comments)

/// HTML tokenizer for converting markup into tokens.
pub mod tokenizer;

pub use tokenizer::{Attribute, HTMLTokenizer, ParseIssue, Token, decode_character_reference};

/// Tokenize `input` in one call.
///
/// The returned stream always ends with [`Token::EndOfFile`].
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}
