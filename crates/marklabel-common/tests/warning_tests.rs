//! Integration tests for the warning channel.

use marklabel_common::warning::{recorded_warnings, set_warnings_enabled, warn_once};

#[test]
fn test_warnings_are_recorded_once() {
    set_warnings_enabled(false);
    warn_once("Test", "duplicate message");
    warn_once("Test", "duplicate message");

    let matching = recorded_warnings()
        .into_iter()
        .filter(|w| w == "[Test] duplicate message")
        .count();
    assert_eq!(matching, 1);
}

#[test]
fn test_component_is_part_of_the_key() {
    set_warnings_enabled(false);
    warn_once("Tokenizer", "same text");
    warn_once("Style", "same text");

    let warnings = recorded_warnings();
    assert!(warnings.contains(&"[Tokenizer] same text".to_string()));
    assert!(warnings.contains(&"[Style] same text".to_string()));
}
