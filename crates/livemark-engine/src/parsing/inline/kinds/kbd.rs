use super::{cached_regex, scan};
use crate::parsing::inline::types::RawMatch;

cached_regex!(kbd_re, r"(?i)<kbd>([^<>]+)</kbd>");

/// Keyboard keys `<kbd>Ctrl</kbd>`, tag case-insensitive.
pub fn find_keys(s: &str) -> Vec<RawMatch> {
    scan(kbd_re(), s, |_, _| true)
}
