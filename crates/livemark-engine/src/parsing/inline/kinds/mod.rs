//! # Inline Kinds
//!
//! Inline-specific matchers that own their syntax delimiters, following the
//! "knowledge ownership" principle: the parser never hardcodes `[[` or
//! `` ` ``, it calls into these modules.
//!
//! ## Modules
//!
//! - **`code_span`**: backtick runs, a raw zone
//! - **`math`**: `$…$` formulas and formula validity
//! - **`emphasis`**: bold-italic, bold, italic, strikethrough, highlight,
//!   superscript, subscript
//! - **`wikilink`**: `[[target#heading|alias]]` and `![[embed]]`
//! - **`link`**: markdown links, images, PDF annotation links, footnote refs
//! - **`kbd`**: `<kbd>` keys
//!
//! Every matcher is a pure function of the line text returning local
//! [`RawMatch`] spans; payloads are built separately by the rule table.

pub mod code_span;
pub mod emphasis;
pub mod kbd;
pub mod link;
pub mod math;
pub mod wikilink;

pub use code_span::CodeSpan;
pub use math::InlineMath;
pub use wikilink::WikiLink;

use regex::{Captures, Regex};

use super::{cursor::is_escaped, types::RawMatch};
use crate::parsing::rope::span::Span;

pub(crate) use crate::parsing::cached_regex;

/// Collects every match of `re` in `s` that `accept` agrees with.
///
/// Group 1 is the content span; every capture group is recorded in
/// `parts`. A rejected or escaped candidate only skips its first char, so
/// a later candidate overlapping it is still found.
pub(crate) fn scan(
    re: &Regex,
    s: &str,
    accept: impl Fn(&str, &Captures<'_>) -> bool,
) -> Vec<RawMatch> {
    let mut out = vec![];
    let mut pos = 0;
    while pos <= s.len() {
        let Some(caps) = re.captures_at(s, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if !is_escaped(s, whole.start()) && accept(s, &caps) {
            let parts: Vec<Option<Span>> = caps
                .iter()
                .skip(1)
                .map(|g| g.map(|g| Span::new(g.start(), g.end())))
                .collect();
            let content = parts
                .first()
                .copied()
                .flatten()
                .unwrap_or(Span::new(whole.end(), whole.end()));
            out.push(RawMatch {
                span: Span::new(whole.start(), whole.end()),
                content,
                parts,
            });
            pos = whole.end().max(whole.start() + 1);
        } else {
            pos = next_char_boundary(s, whole.start());
        }
    }
    out
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    let mut next = idx + 1;
    while next < s.len() && !s.is_char_boundary(next) {
        next += 1;
    }
    next
}

/// Word characters for intraword delimiter checks (`snake_case_name`).
pub(crate) fn is_word_byte(b: Option<u8>) -> bool {
    b.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
}
