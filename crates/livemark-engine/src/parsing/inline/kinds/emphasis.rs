//! Delimiter-run families: bold-italic, bold, italic, strikethrough,
//! highlight, superscript and subscript.
//!
//! The regex crate has no lookaround, so each family pairs a plain pattern
//! with a guard on the bytes around the match. The guards keep a family
//! from matching inside a longer run of its own delimiter (`*` inside
//! `***`, `~` inside `~~`) and reject intraword `_`.

use regex::Captures;

use super::{cached_regex, is_word_byte, scan};
use crate::parsing::inline::{
    cursor::{byte_at, byte_before},
    types::RawMatch,
};

pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const TILDE: u8 = b'~';
    pub const EQUALS: u8 = b'=';
    pub const CARET: u8 = b'^';
}

cached_regex!(
    bold_italic_star_re,
    r"\*\*\*([^\s*](?:[^*]*?[^\s*])?)\*\*\*"
);
cached_regex!(
    bold_italic_under_re,
    r"___([^\s_](?:[^_]*?[^\s_])?)___"
);
cached_regex!(bold_star_re, r"\*\*([^\s*](?:.*?[^\s*])?)\*\*");
cached_regex!(bold_under_re, r"__([^\s_](?:.*?[^\s_])?)__");
cached_regex!(italic_star_re, r"\*([^\s*](?:[^*]*?[^\s*])?)\*");
cached_regex!(italic_under_re, r"_([^\s_](?:[^_]*?[^\s_])?)_");
cached_regex!(strike_re, r"~~([^\s~](?:.*?[^\s~])?)~~");
cached_regex!(highlight_re, r"==([^\s=](?:.*?[^\s=])?)==");
cached_regex!(superscript_re, r"\^([^\s^\[\]]+)\^");
cached_regex!(subscript_re, r"~([^\s~]+)~");

/// The match is not glued to another `delim` on either side.
fn isolated(delim: u8) -> impl Fn(&str, &Captures<'_>) -> bool {
    move |s, caps| {
        caps.get(0).is_some_and(|m| {
            byte_before(s, m.start()) != Some(delim) && byte_at(s, m.end()) != Some(delim)
        })
    }
}

/// The match does not start or end inside a word.
fn word_bounded(s: &str, caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| {
        !is_word_byte(byte_before(s, m.start())) && !is_word_byte(byte_at(s, m.end()))
    })
}

/// Merges two matchers' results in position order.
fn merged(mut a: Vec<RawMatch>, b: Vec<RawMatch>) -> Vec<RawMatch> {
    a.extend(b);
    a.sort_by_key(|m| (m.span.start, m.span.end));
    a
}

pub fn find_bold_italic(s: &str) -> Vec<RawMatch> {
    merged(
        scan(bold_italic_star_re(), s, isolated(Emphasis::STAR)),
        scan(bold_italic_under_re(), s, word_bounded),
    )
}

pub fn find_bold(s: &str) -> Vec<RawMatch> {
    merged(
        scan(bold_star_re(), s, isolated(Emphasis::STAR)),
        scan(bold_under_re(), s, word_bounded),
    )
}

pub fn find_italic(s: &str) -> Vec<RawMatch> {
    merged(
        scan(italic_star_re(), s, isolated(Emphasis::STAR)),
        scan(italic_under_re(), s, word_bounded),
    )
}

pub fn find_strikethrough(s: &str) -> Vec<RawMatch> {
    scan(strike_re(), s, isolated(Emphasis::TILDE))
}

pub fn find_highlight(s: &str) -> Vec<RawMatch> {
    scan(highlight_re(), s, isolated(Emphasis::EQUALS))
}

pub fn find_superscript(s: &str) -> Vec<RawMatch> {
    scan(superscript_re(), s, |s, caps| {
        // `[^note]` is a footnote reference, not a superscript opener
        caps.get(0).is_some_and(|m| byte_before(s, m.start()) != Some(b'['))
    })
}

pub fn find_subscript(s: &str) -> Vec<RawMatch> {
    scan(subscript_re(), s, isolated(Emphasis::TILDE))
}
