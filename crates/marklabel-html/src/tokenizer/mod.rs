//! HTML tokenizer module.
//!
//! Implements a reduced form of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference decoding per § 13.2.5.72–80.
pub mod character_reference;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// HTML tokenizer state machine implementation.
pub mod machine;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use character_reference::decode_character_reference;
pub use machine::{HTMLTokenizer, ParseIssue, TokenizerState};
pub use token::{Attribute, Token};
