//! # Parsing
//!
//! Line-oriented live-preview parsing: block rules decide each line's
//! primary construct, inline rules scan what is left, and the resolver
//! turns the overlapping candidates into a clean element list.
//!
//! [`parse_document`] drives a pass over a document range with reveal
//! gating and the line cache; [`parse_line`] is the pure, uncached core.

/// Declares `fn $name() -> &'static Regex`, compiled once per process.
macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| regex::Regex::new($pattern).expect("Invalid regex"))
        }
    };
}
pub(crate) use cached_regex;

pub mod blocks;
pub mod element;
pub mod inline;
pub mod resolve;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use std::ops::Range;

use xi_rope::Rope;

use crate::{
    cache::{LineCache, LineKey},
    reveal::RevealSource,
};
use blocks::{LineInput, Region, RegionMap, parse_block};
use element::ParsedElement;
use inline::parse_inline;
use resolve::resolve;
use rope::{line_count, line_of_offset, line_ref, stored_line_count};

/// Which part of the document a pass covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseRange {
    #[default]
    Document,
    /// 0-based line numbers, end exclusive.
    Lines(Range<usize>),
    /// Byte offsets; every line the range touches is included.
    Bytes(Range<usize>),
}

impl ParseRange {
    /// The covered lines, clamped to the document.
    pub fn line_range(&self, rope: &Rope) -> Range<usize> {
        let count = line_count(rope);
        match self {
            ParseRange::Document => 0..count,
            ParseRange::Lines(r) => r.start.min(count)..r.end.min(count),
            ParseRange::Bytes(r) => {
                let (from, to) = (r.start.min(r.end), r.start.max(r.end));
                let first = line_of_offset(rope, from);
                let last = if to > from {
                    line_of_offset(rope, to - 1)
                } else {
                    first
                };
                first..last + 1
            }
        }
    }
}

/// Parses one line in isolation: block rule, then inline scan of the
/// remainder, then conflict resolution. `text` is the line without its
/// terminator and `line_start` its absolute offset.
pub fn parse_line(line_number: usize, text: &str, line_start: usize) -> Vec<ParsedElement> {
    let text = text.trim_end_matches(['\r', '\n']);
    let input = LineInput {
        number: line_number,
        start: line_start,
        text,
    };
    let outcome = parse_block(&input);
    let mut candidates = outcome.elements;
    for rest in outcome.inline {
        candidates.extend(resolve(parse_inline(
            line_start + rest.start,
            &text[rest.start..rest.end],
            line_number,
        )));
    }
    resolve(candidates)
}

/// Parses the lines of `range` into an ordered element list.
///
/// Order of checks per line:
/// 1. lines inside a multi-line region are never parsed; the region's
///    block element is emitted once unless one of its lines or the element
///    itself is revealed;
/// 2. a revealed line yields nothing and never touches the cache;
/// 3. the cache is consulted, and filled on a miss;
/// 4. elements the reveal source asks for are filtered out.
///
/// Cache entries therefore never depend on reveal state.
///
/// Scans the whole document for regions first; callers that parse the
/// same text repeatedly keep a [`RegionMap`] and use
/// [`parse_with_regions`].
pub fn parse_document<R: RevealSource + ?Sized>(
    rope: &Rope,
    range: ParseRange,
    reveal: &R,
    cache: &mut LineCache,
) -> Vec<ParsedElement> {
    parse_with_regions(rope, &RegionMap::scan(rope), range, reveal, cache)
}

/// [`parse_document`] against regions scanned earlier from the same text.
/// Only the lines of `range` are read from the rope.
pub fn parse_with_regions<R: RevealSource + ?Sized>(
    rope: &Rope,
    regions: &RegionMap,
    range: ParseRange,
    reveal: &R,
    cache: &mut LineCache,
) -> Vec<ParsedElement> {
    let wanted = range.line_range(rope);
    let end = wanted.end.min(stored_line_count(rope));

    let mut out = vec![];
    let mut line = wanted.start;
    let (mut hits, mut misses, mut revealed) = (0usize, 0usize, 0usize);

    while line < end {
        if let Some(region) = regions.containing(line) {
            if !region_revealed(region, reveal) {
                out.extend(region.to_element(rope));
            }
            line = region.last_line + 1;
            continue;
        }

        if reveal.should_reveal_line(line) {
            revealed += 1;
            line += 1;
            continue;
        }

        let lr = line_ref(rope, line);
        let key = LineKey::new(line, lr.content());
        let start = lr.span.start;
        let elements: Vec<ParsedElement> = match cache.get(&key) {
            Some(hit) => {
                hits += 1;
                hit.iter().map(|el| el.shifted(start)).collect()
            }
            None => {
                misses += 1;
                let parsed = parse_line(line, lr.content(), start);
                cache.set(key, parsed.iter().map(|el| el.unshifted(start)).collect());
                parsed
            }
        };
        out.extend(
            elements
                .into_iter()
                .filter(|el| !reveal.should_reveal_element(&el.key())),
        );
        line += 1;
    }

    log::debug!(
        "parsed lines {}..{}: {} elements ({} hits, {} misses, {} revealed), cache {:?}",
        wanted.start,
        end,
        out.len(),
        hits,
        misses,
        revealed,
        cache.stats()
    );
    out
}

fn region_revealed<R: RevealSource + ?Sized>(region: &Region, reveal: &R) -> bool {
    (region.first_line..=region.last_line).any(|l| reveal.should_reveal_line(l))
        || reveal.should_reveal_element(&region.key())
}
