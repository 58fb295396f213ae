use super::{cursor::is_escaped, rules::INLINE_RULES};
use crate::parsing::element::{ElementDetail, ParsedElement};

/// Scans `s` for every inline family and returns unresolved candidates.
///
/// # Arguments
/// - `base`: Byte offset in the rope where `s` begins (for absolute spans)
/// - `s`: A single line's remaining text (never contains a newline)
/// - `line_number`: 0-based line the text belongs to
///
/// Families are scanned one after another in table order, each
/// exhaustively. Matches from different families may overlap; the
/// conflict resolver sorts that out. Escaped openers are dropped here
/// regardless of what the matcher reported.
pub fn parse_inline(base: usize, s: &str, line_number: usize) -> Vec<ParsedElement> {
    let mut out = vec![];

    for rule in INLINE_RULES {
        for m in (rule.find)(s) {
            if is_escaped(s, m.span.start) {
                continue;
            }
            let Some(detail) = (rule.build)(s, &m) else {
                continue;
            };
            let content = m.content_text(s);
            let mut el =
                ParsedElement::replace(rule.family.element_type(), m.span.shift(base), line_number)
                    .with_content(content, m.content.shift(base));
            if detail == ElementDetail::Formula {
                el = el.with_formula(content.trim());
            }
            out.push(el.with_detail(detail));
        }
    }

    out
}
