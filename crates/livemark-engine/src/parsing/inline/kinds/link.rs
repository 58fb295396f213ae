//! Bracket families: PDF annotation links, markdown links, images and
//! footnote references.

use super::{cached_regex, scan};
use crate::parsing::inline::{
    cursor::{byte_at, byte_before, is_escaped},
    types::RawMatch,
};

pub struct Link;

impl Link {
    pub const BANG: u8 = b'!';
}

// parts: [label, pdf path, annotation id]
cached_regex!(
    annotation_re,
    r"\[([^\[\]]+)\]\(([^()\s]+?\.pdf)#annotation=([A-Za-z0-9_-]+)\)"
);
// parts: [label, url, title]
cached_regex!(
    link_re,
    r#"\[([^\[\]]*)\]\(([^()\s]+)(?:\s+"([^"]*)")?\)"#
);
// parts: [alt, src, title]
cached_regex!(
    image_re,
    r#"!\[([^\[\]]*)\]\(([^()\s]+)(?:\s+"([^"]*)")?\)"#
);
// parts: [id]
cached_regex!(footnote_re, r"\[\^([^\[\]\s]+)\]");

/// Rejects the bracket part of an image. An escaped `!` is literal text.
fn not_after_bang(s: &str, caps: &regex::Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| {
        byte_before(s, m.start()) != Some(Link::BANG) || is_escaped(s, m.start() - 1)
    })
}

pub fn find_annotation_links(s: &str) -> Vec<RawMatch> {
    scan(annotation_re(), s, not_after_bang)
}

pub fn find_markdown_links(s: &str) -> Vec<RawMatch> {
    scan(link_re(), s, not_after_bang)
}

pub fn find_images(s: &str) -> Vec<RawMatch> {
    scan(image_re(), s, |_, _| true)
}

/// `[^id]` references. A `[^id]:` at the start of the line is a footnote
/// definition and is skipped.
pub fn find_footnote_refs(s: &str) -> Vec<RawMatch> {
    scan(footnote_re(), s, |s, caps| {
        caps.get(0).is_some_and(|m| {
            let definition = s[..m.start()].trim().is_empty() && byte_at(s, m.end()) == Some(b':');
            !definition
        })
    })
}
