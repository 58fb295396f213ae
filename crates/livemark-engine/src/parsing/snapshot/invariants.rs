use xi_rope::Rope;

use crate::parsing::element::ParsedElement;

/// Validates parser output invariants.
///
/// Asserts that:
/// - every span (content and children included) lies within the rope
/// - content spans are well-formed
/// - replace elements, children included, are pairwise disjoint or nested,
///   never partially overlapping
/// - nothing is nested inside a raw zone
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, elements: &[ParsedElement]) {
    let n = rope.len();
    let mut all = vec![];
    flatten(elements, &mut all);
    for el in &all {
        check_bounds(el, n);
    }

    let mut replaced: Vec<&ParsedElement> = all.into_iter().filter(|e| !e.is_line_style()).collect();
    replaced.sort_by_key(|e| e.from);
    for (i, a) in replaced.iter().enumerate() {
        for b in replaced[i + 1..].iter().take_while(|b| b.from < a.to) {
            let (sa, sb) = (a.span(), b.span());
            if !sa.overlaps(sb) {
                continue;
            }
            assert!(
                sa.contains(sb) || sb.contains(sa),
                "partial overlap: {:?} {:?} and {:?} {:?}",
                a.kind,
                sa,
                b.kind,
                sb
            );
            let (outer, inner) = if sa.contains(sb) { (a, b) } else { (b, a) };
            assert!(
                !outer.kind.is_raw_zone(),
                "{:?} {:?} nested inside raw zone {:?} {:?}",
                inner.kind,
                inner.span(),
                outer.kind,
                outer.span()
            );
        }
    }
}

fn flatten<'a>(elements: &'a [ParsedElement], out: &mut Vec<&'a ParsedElement>) {
    for el in elements {
        out.push(el);
        flatten(&el.children, out);
    }
}

fn check_bounds(el: &ParsedElement, n: usize) {
    assert!(
        el.from <= el.to && el.to <= n,
        "element span out of bounds: {:?} {:?} (rope len: {})",
        el.kind,
        el.span(),
        n
    );
    if let Some(content) = el.content_span {
        assert!(
            content.start <= content.end && content.end <= n,
            "content span out of bounds: {:?} of {:?} (rope len: {})",
            content,
            el.kind,
            n
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{element::ElementType, rope::span::Span};

    #[test]
    #[should_panic(expected = "partial overlap")]
    fn children_take_part_in_the_overlap_sweep() {
        let rope = Rope::from("| a **b | c** d |");
        let cell = ParsedElement::replace(ElementType::Table, Span::new(0, 7), 0);
        let row = ParsedElement::line_style(ElementType::Table, 0, 0).with_children(vec![cell]);
        let bold = ParsedElement::replace(ElementType::InlineBold, Span::new(4, 13), 0);
        check(&rope, &[row, bold]);
    }

    #[test]
    #[should_panic(expected = "nested inside raw zone")]
    fn child_inside_raw_zone_is_caught() {
        let rope = Rope::from("`| x |`");
        let cell = ParsedElement::replace(ElementType::Table, Span::new(1, 4), 0);
        let row = ParsedElement::line_style(ElementType::Table, 0, 0).with_children(vec![cell]);
        let code = ParsedElement::replace(ElementType::InlineCode, Span::new(0, 7), 0);
        check(&rope, &[row, code]);
    }
}
