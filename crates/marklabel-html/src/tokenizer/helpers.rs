//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Error recovery for input that ends inside a tag

use marklabel_common::warning::warn_once;

use super::character_reference::decode_character_reference;
use super::machine::{HTMLTokenizer, ParseIssue, TokenizerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "If the next few characters are an ASCII case-insensitive match for..."
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input
            .get(self.current_pos..self.current_pos + target.len())
            .is_some_and(|slice| slice.eq_ignore_ascii_case(target))
    }

    /// Consume `target`, which the caller has already matched.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, or U+0020 SPACE."
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Entered with `&` as the current character. Decodes the reference that
    /// follows and flushes it to the current attribute value or the text.
    /// If nothing decodes, the `&` itself is flushed.
    pub(super) fn consume_character_reference(&mut self, in_attribute: bool) {
        let decoded = decode_character_reference(&self.input[self.current_pos..], in_attribute);
        let text = match decoded {
            Some(decoded) => {
                if decoded.missing_semicolon {
                    self.log_parse_error("missing-semicolon-after-character-reference");
                }
                self.current_pos += decoded.consumed;
                decoded.text
            }
            None => "&".to_string(),
        };

        // "Flush code points consumed as a character reference"
        for c in text.chars() {
            if in_attribute {
                self.append_to_attribute_value(c);
            } else {
                self.emit_character_token(c);
            }
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_value(c);
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token" - adds the token to the output stream.
    pub(super) fn emit_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        for name in token.remove_duplicate_attributes() {
            self.log_parse_error(&format!("duplicate-attribute ({name})"));
        }
        self.token_stream.push(token);
    }

    /// "Emit the current input character as a character token."
    ///
    /// Consecutive characters are merged into the trailing text token.
    pub(super) fn emit_character_token(&mut self, c: char) {
        if let Some(Token::Text { data }) = self.token_stream.last_mut() {
            data.push(c);
        } else {
            self.token_stream.push(Token::Text {
                data: c.to_string(),
            });
        }
    }

    pub(super) fn emit_comment_token(&mut self) {
        let data = std::mem::take(&mut self.comment);
        self.token_stream.push(Token::Comment { data });
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }

    /// "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// Browsers silently drop the unfinished tag. A label would then lose the
    /// author's text, so the source from the opening `<` is kept as literal
    /// text instead.
    pub(super) fn emit_unterminated_tag_as_text(&mut self) {
        self.log_parse_error("eof-in-tag");
        self.current_token = None;
        let remainder = self.input[self.tag_start..].to_string();
        for c in remainder.chars() {
            self.emit_character_token(c);
        }
        self.emit_eof_token();
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records the error and reports it through the shared warning channel.
    /// Parse errors are never fatal - the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&mut self, code: &str) {
        let position = self.current_pos;
        warn_once("Tokenizer", &format!("{code} at byte {position}"));
        self.issues.push(ParseIssue {
            message: code.to_string(),
            position,
        });
    }
}
