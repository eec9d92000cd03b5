//! Label warnings with colored terminal output.
//!
//! Markup is author-supplied and never fails to render, so every recoverable
//! problem (a stray `<`, an unknown entity, an unparsable color) is reported
//! here instead of being returned as an error. Messages are deduplicated so a
//! label that is re-laid out on every frame does not spam the terminal.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Every unique warning seen so far, in the order it was first reported.
struct WarningLog {
    seen: HashSet<String>,
    order: Vec<String>,
}

static WARNED: Mutex<Option<WarningLog>> = Mutex::new(None);

/// When false, warnings are still recorded but not printed.
static ENABLED: AtomicBool = AtomicBool::new(true);

fn log() -> MutexGuard<'static, Option<WarningLog>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about malformed or unsupported input (prints once per unique message)
///
/// # Example
/// ```
/// use marklabel_common::warning::warn_once;
///
/// warn_once("Style", "invalid color '#12' on <color>");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let mut guard = log();
    let log = guard.get_or_insert_with(|| WarningLog {
        seen: HashSet::new(),
        order: Vec::new(),
    });
    if !log.seen.insert(key.clone()) {
        return;
    }
    log.order.push(key);
    drop(guard);

    if ENABLED.load(Ordering::Relaxed) {
        eprintln!("{YELLOW}[marklabel {component}] ⚠ {message}{RESET}");
    }
}

/// Turn printing of warnings on or off. Recording is unaffected.
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Snapshot of every warning recorded since the last [`clear_warnings`],
/// formatted as `[component] message`.
#[must_use]
pub fn recorded_warnings() -> Vec<String> {
    log().as_ref().map(|log| log.order.clone()).unwrap_or_default()
}

/// Clear all recorded warnings (call when a label gets new text)
pub fn clear_warnings() {
    if let Some(log) = log().as_mut() {
        log.seen.clear();
        log.order.clear();
    }
}
