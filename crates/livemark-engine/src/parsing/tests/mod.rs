//! Behavior tests for `parse_line` and `parse_document`.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use super::{
    ParseRange,
    element::{Decoration, ElementKey, ElementType, ParsedElement},
    parse_document, parse_line, snapshot,
};
use crate::{
    cache::LineCache,
    reveal::{RevealContext, RevealSource},
};

/// Reveals a fixed set of lines and element keys.
#[derive(Default)]
struct Fixed {
    lines: HashSet<usize>,
    elements: HashSet<ElementKey>,
}

impl RevealSource for Fixed {
    fn should_reveal_line(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    fn should_reveal_element(&self, key: &ElementKey) -> bool {
        self.elements.contains(key)
    }
}

fn parse_all(md: &str) -> (Rope, Vec<ParsedElement>) {
    let rope = Rope::from(md);
    let mut cache = LineCache::new();
    let els = parse_document(&rope, ParseRange::Document, &RevealContext::none(), &mut cache);
    snapshot::invariants(&rope, &els);
    (rope, els)
}

fn kinds(els: &[ParsedElement]) -> Vec<(ElementType, Option<String>)> {
    els.iter().map(|e| (e.kind, e.content.clone())).collect()
}

#[test]
fn heading_scenario() {
    let els = parse_line(0, "# Hello", 0);
    assert_eq!(els.len(), 2);
    assert_eq!(els[0].kind, ElementType::Heading);
    assert_eq!(els[0].decoration, Decoration::LineStyle);
    assert_eq!(els[0].level, Some(1));
    assert_eq!(els[1].decoration, Decoration::Replace);
    assert_eq!((els[1].from, els[1].to), (0, 7));
    assert_eq!(els[1].content.as_deref(), Some("Hello"));
}

#[test]
fn bold_and_italic_scenario() {
    let els = parse_line(0, "**bold** and *italic*", 0);
    assert_eq!(
        kinds(&els),
        vec![
            (ElementType::InlineBold, Some("bold".into())),
            (ElementType::InlineItalic, Some("italic".into())),
        ]
    );
    assert!(els[0].to <= els[1].from);
}

#[test]
fn code_span_scenario() {
    let els = parse_line(0, "`code with **stars**`", 0);
    assert_eq!(
        kinds(&els),
        vec![(ElementType::InlineCode, Some("code with **stars**".into()))]
    );
}

#[test]
fn inline_markup_inside_a_heading_is_nested() {
    let els = parse_line(0, "## A *b*", 0);
    assert_eq!(
        els.iter().map(|e| (e.kind, e.from, e.to)).collect::<Vec<_>>(),
        vec![
            (ElementType::Heading, 0, 0),
            (ElementType::Heading, 0, 8),
            (ElementType::InlineItalic, 5, 8),
        ]
    );
}

#[rstest]
#[case(r"\*not italic*")]
#[case(r"\`not code`")]
#[case(r"\[[not a link]]")]
#[case(r"\$x$")]
#[case(r"\~~no strike~~")]
fn escaped_openers_produce_nothing(#[case] line: &str) {
    assert_eq!(parse_line(0, line, 0), vec![]);
}

#[test]
fn double_backslash_does_not_escape() {
    let els = parse_line(0, r"\\*italic*", 0);
    assert_eq!(kinds(&els), vec![(ElementType::InlineItalic, Some("italic".into()))]);
}

#[test]
fn escaped_image_bang_leaves_a_link() {
    let els = parse_line(0, r"\![x](y.png)", 0);
    assert_eq!(kinds(&els), vec![(ElementType::InlineLink, Some("x".into()))]);
    assert_eq!((els[0].from, els[0].to), (2, 12));
}

#[test]
fn unclosed_constructs_are_plain_text() {
    assert_eq!(parse_line(0, "[[unclosed and `also unclosed", 0), vec![]);
}

#[test]
fn empty_document() {
    let (_, els) = parse_all("");
    assert!(els.is_empty());
}

#[test]
fn blank_lines_only() {
    let (_, els) = parse_all("\n\n\n");
    assert!(els.is_empty());
}

#[test]
fn code_block_interior_is_raw() {
    let (_, els) = parse_all("```md\n# not a heading\n**not bold**\n```\n*after*");
    assert_eq!(
        kinds(&els),
        vec![
            (
                ElementType::CodeBlock,
                Some("# not a heading\n**not bold**".into())
            ),
            (ElementType::InlineItalic, Some("after".into())),
        ]
    );
    assert_eq!(els[0].language.as_deref(), Some("md"));
}

#[test]
fn unclosed_formula_marker_leaves_following_lines_alone() {
    let (_, els) = parse_all("$$\n**bold**");
    assert_eq!(kinds(&els), vec![(ElementType::InlineBold, Some("bold".into()))]);
}

#[test]
fn revealed_line_is_skipped_and_not_cached() {
    let rope = Rope::from("**a**\n**b**");
    let mut cache = LineCache::new();
    let reveal = Fixed {
        lines: HashSet::from([0]),
        ..Fixed::default()
    };
    let els = parse_document(&rope, ParseRange::Document, &reveal, &mut cache);
    assert_eq!(kinds(&els), vec![(ElementType::InlineBold, Some("b".into()))]);
    assert_eq!(cache.stats().size, 1);
}

#[test]
fn element_reveal_is_applied_after_the_cache() {
    let rope = Rope::from("**a** *b*");
    let mut cache = LineCache::new();
    let first = parse_document(&rope, ParseRange::Document, &RevealContext::none(), &mut cache);

    let reveal = Fixed {
        elements: HashSet::from([first[0].key()]),
        ..Fixed::default()
    };
    let second = parse_document(&rope, ParseRange::Document, &reveal, &mut cache);
    assert_eq!(kinds(&second), vec![(ElementType::InlineItalic, Some("b".into()))]);
    assert_eq!(cache.stats().hits, 1);

    // the cached entry still holds both elements
    let third = parse_document(&rope, ParseRange::Document, &RevealContext::none(), &mut cache);
    assert_eq!(third, first);
}

#[test]
fn region_is_hidden_while_any_of_its_lines_is_revealed() {
    let rope = Rope::from("```\ncode\n```");
    let mut cache = LineCache::new();
    let reveal = Fixed {
        lines: HashSet::from([1]),
        ..Fixed::default()
    };
    assert!(parse_document(&rope, ParseRange::Document, &reveal, &mut cache).is_empty());
    assert_eq!(
        parse_document(&rope, ParseRange::Document, &Fixed::default(), &mut cache).len(),
        1
    );
    // region lines are never cached
    assert_eq!(cache.stats().size, 0);
}

#[test]
fn region_is_emitted_when_the_window_starts_inside_it() {
    let rope = Rope::from("```\na\nb\n```\n*x*");
    let mut cache = LineCache::new();
    let els = parse_document(&rope, ParseRange::Lines(2..5), &RevealContext::none(), &mut cache);
    assert_eq!(els.len(), 2);
    assert_eq!(els[0].kind, ElementType::CodeBlock);
    assert_eq!(els[0].line_number, 0);
}

#[test]
fn byte_range_covers_touched_lines() {
    let rope = Rope::from("*a*\n*b*\n*c*");
    let mut cache = LineCache::new();
    let els = parse_document(&rope, ParseRange::Bytes(5..6), &RevealContext::none(), &mut cache);
    assert_eq!(kinds(&els), vec![(ElementType::InlineItalic, Some("b".into()))]);
}

#[test]
fn byte_range_end_is_exclusive() {
    let rope = Rope::from("*a*\n*b*");
    let mut cache = LineCache::new();
    assert_eq!(ParseRange::Bytes(0..4).line_range(&rope), 0..1);
    assert_eq!(ParseRange::Bytes(0..5).line_range(&rope), 0..2);
    assert_eq!(ParseRange::Bytes(4..4).line_range(&rope), 1..2);
    let els = parse_document(&rope, ParseRange::Bytes(0..4), &RevealContext::none(), &mut cache);
    assert_eq!(kinds(&els), vec![(ElementType::InlineItalic, Some("a".into()))]);
}

#[test]
fn emphasis_cannot_span_table_cells() {
    let (_, els) = parse_all("| a **b | c** d |");
    assert_eq!(els.len(), 1);
    assert!(els[0].is_line_style());
    assert_eq!(els[0].children.len(), 2);
}

#[test]
fn code_span_nests_inside_its_cell() {
    let (_, els) = parse_all("|`x`|");
    assert_eq!(
        els.iter().map(|e| (e.kind, e.from, e.to)).collect::<Vec<_>>(),
        vec![(ElementType::Table, 0, 0), (ElementType::InlineCode, 1, 4)]
    );
    let cell = &els[0].children[0];
    assert_eq!((cell.from, cell.to), (0, 4));
    assert_eq!(els[1].content.as_deref(), Some("x"));
}

#[test]
fn table_cells_resolve_independently() {
    let els = parse_line(0, "| *a* | **b** |", 0);
    assert_eq!(
        kinds(&els),
        vec![
            (ElementType::Table, None),
            (ElementType::InlineItalic, Some("a".into())),
            (ElementType::InlineBold, Some("b".into())),
        ]
    );
}

#[test]
fn out_of_range_lines_are_clamped() {
    let rope = Rope::from("*a*");
    let mut cache = LineCache::new();
    let els = parse_document(&rope, ParseRange::Lines(0..50), &RevealContext::none(), &mut cache);
    assert_eq!(els.len(), 1);
    assert!(parse_document(&rope, ParseRange::Lines(7..9), &RevealContext::none(), &mut cache).is_empty());
}

#[test]
fn parsing_is_idempotent() {
    let md = "# T\n> [!note] N\n- [ ] task with `code`\n| a | b |\n$$\nx\n$$\ntext $y$ and [[w]]";
    let rope = Rope::from(md);
    let mut cache = LineCache::new();
    let cold = parse_document(&rope, ParseRange::Document, &RevealContext::none(), &mut cache);
    let warm = parse_document(&rope, ParseRange::Document, &RevealContext::none(), &mut cache);
    let uncached = parse_document(&rope, ParseRange::Document, &RevealContext::none(), &mut LineCache::new());
    assert_eq!(cold, warm);
    assert_eq!(cold, uncached);
    snapshot::invariants(&rope, &cold);
}

#[test]
fn multibyte_text_keeps_byte_offsets() {
    let (rope, els) = parse_all("héllo **wörld**");
    assert_eq!(els.len(), 1);
    let text = rope.slice_to_cow(els[0].from..els[0].to);
    assert_eq!(text, "**wörld**");
}

#[test]
fn crlf_line_endings() {
    let (rope, els) = parse_all("# A\r\n**b**\r\n");
    assert_eq!(els[1].to, 3);
    assert_eq!(rope.slice_to_cow(els[2].from..els[2].to), "**b**");
}
