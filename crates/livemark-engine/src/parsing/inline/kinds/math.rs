use super::{cached_regex, scan};
use crate::parsing::inline::{
    cursor::{byte_at, byte_before},
    types::RawMatch,
};

/// Inline formula `$…$`. A raw zone.
pub struct InlineMath;

/// Literal stand-ins that are never rendered as formulas.
pub const FORMULA_PLACEHOLDERS: &[&str] = &["formula", "...", "…", "TeX"];

cached_regex!(inline_math_re, r"\$([^\s$](?:[^$]*?[^\s$])?)\$");

impl InlineMath {
    pub const DOLLAR: u8 = b'$';

    /// Finds `$x$` formulas. The delimiters may not touch another `$`, the
    /// content may not start or end with whitespace, and a closing `$`
    /// followed by a digit is a currency amount, not a formula.
    pub fn find(s: &str) -> Vec<RawMatch> {
        scan(inline_math_re(), s, |s, caps| {
            let Some(whole) = caps.get(0) else {
                return false;
            };
            let after = byte_at(s, whole.end());
            byte_before(s, whole.start()) != Some(Self::DOLLAR)
                && after != Some(Self::DOLLAR)
                && !after.is_some_and(|b| b.is_ascii_digit())
        })
    }
}

/// A formula is usable only if its trimmed source is neither empty nor a
/// placeholder.
pub fn is_valid_formula(source: &str) -> bool {
    let t = source.trim();
    !t.is_empty() && !FORMULA_PLACEHOLDERS.contains(&t)
}
