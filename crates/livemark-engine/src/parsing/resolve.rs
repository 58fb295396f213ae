//! # Conflict Resolution
//!
//! Merges block and inline candidates for one line into a list whose
//! survivors are pairwise disjoint or properly nested.

use std::{cmp::Ordering, collections::HashSet};

use super::element::ParsedElement;

/// Which of a compared pair loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loser {
    Outer,
    Inner,
}

/// Resolves overlapping candidates.
///
/// Identical `(from, to, kind)` triples are collapsed to their first
/// occurrence. Partial overlaps go to the higher-priority kind, or to the
/// earlier candidate in scan order when priorities tie. Nesting keeps both
/// sides unless the outer element is a raw zone or both spans are
/// identical. Zero-width line styles never conflict.
pub fn resolve(candidates: Vec<ParsedElement>) -> Vec<ParsedElement> {
    let mut seen = HashSet::new();
    let mut items: Vec<(usize, ParsedElement)> = candidates
        .into_iter()
        .filter(|el| seen.insert(el.key()))
        .enumerate()
        .collect();

    items.sort_by(|(ia, a), (ib, b)| {
        a.from
            .cmp(&b.from)
            .then(b.to.cmp(&a.to))
            .then(a.kind.cmp(&b.kind))
            .then(ia.cmp(ib))
    });

    let mut out: Vec<ParsedElement> = items
        .into_iter()
        .fold(Vec::new(), admit)
        .into_iter()
        .map(|(_, el)| el)
        .collect();
    out.sort_by(compare_output);
    out
}

/// Adds `candidate` to `survivors` unless an accepted element beats it.
/// Accepted elements the candidate beats are left out of the result.
fn admit(
    survivors: Vec<(usize, ParsedElement)>,
    candidate: (usize, ParsedElement),
) -> Vec<(usize, ParsedElement)> {
    let verdicts: Vec<Option<Loser>> = survivors.iter().map(|s| conflict(s, &candidate)).collect();
    if verdicts.contains(&Some(Loser::Inner)) {
        return survivors;
    }
    survivors
        .into_iter()
        .zip(verdicts)
        .filter_map(|(s, verdict)| (verdict != Some(Loser::Outer)).then_some(s))
        .chain(std::iter::once(candidate))
        .collect()
}

/// `a` sorts before `b`, so `a` starts first or, on a shared start, is
/// the longer of the two.
fn conflict(
    (ia, a): &(usize, ParsedElement),
    (ib, b): &(usize, ParsedElement),
) -> Option<Loser> {
    if a.is_line_style() || b.is_line_style() || !a.span().overlaps(b.span()) {
        return None;
    }

    let by_priority = || match a.kind.priority().cmp(&b.kind.priority()) {
        Ordering::Less => Loser::Inner,
        Ordering::Greater => Loser::Outer,
        Ordering::Equal if ia < ib => Loser::Inner,
        Ordering::Equal => Loser::Outer,
    };

    if a.span() == b.span() {
        return Some(by_priority());
    }
    if a.span().contains(b.span()) {
        return a.kind.is_raw_zone().then_some(Loser::Inner);
    }
    Some(by_priority())
}

fn compare_output(a: &ParsedElement, b: &ParsedElement) -> Ordering {
    a.from
        .cmp(&b.from)
        .then(a.to.cmp(&b.to))
        .then(a.kind.cmp(&b.kind))
}
