use super::kinds::{
    BlockQuote, CodeFence, Details, Heading, HorizontalRule, ListItem, MathFence, MathLine, Table,
};
use crate::parsing::{
    element::{ElementDetail, ElementType, ParsedElement},
    inline::kinds::math::is_valid_formula,
    rope::span::Span,
};

/// One line handed to the block rules. `text` has no line terminator.
#[derive(Debug, Clone, Copy)]
pub struct LineInput<'a> {
    pub number: usize,
    /// Absolute offset of `text` in the document.
    pub start: usize,
    pub text: &'a str,
}

impl LineInput<'_> {
    fn abs(&self, local: Span) -> Span {
        local.shift(self.start)
    }

    fn slice(&self, local: Span) -> &str {
        &self.text[local.start..local.end]
    }

    fn whole(&self) -> Span {
        Span::new(0, self.text.len())
    }
}

/// What a block rule decided for a line: its elements, and the local spans
/// left for inline parsing. Each span is scanned and resolved on its own;
/// an empty list stops all further parsing of the line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockOutcome {
    pub elements: Vec<ParsedElement>,
    pub inline: Vec<Span>,
}

impl BlockOutcome {
    fn stop(elements: Vec<ParsedElement>) -> Self {
        Self {
            elements,
            inline: vec![],
        }
    }

    fn then_inline(elements: Vec<ParsedElement>, inline: Span) -> Self {
        Self::then_inline_each(elements, vec![inline])
    }

    fn then_inline_each(elements: Vec<ParsedElement>, inline: Vec<Span>) -> Self {
        Self { elements, inline }
    }
}

type BlockMatcher = fn(&LineInput<'_>) -> Option<BlockOutcome>;

pub struct BlockRule {
    pub name: &'static str,
    pub parse: BlockMatcher,
}

/// Block rules in precedence order. The first rule that matches a line
/// decides it.
pub static BLOCK_RULES: &[BlockRule] = &[
    BlockRule {
        name: "code-fence",
        parse: code_fence,
    },
    BlockRule {
        name: "block-formula",
        parse: block_formula,
    },
    BlockRule {
        name: "heading",
        parse: heading,
    },
    BlockRule {
        name: "blockquote",
        parse: blockquote,
    },
    BlockRule {
        name: "list-item",
        parse: list_item,
    },
    BlockRule {
        name: "horizontal-rule",
        parse: horizontal_rule,
    },
    BlockRule {
        name: "table-row",
        parse: table_row,
    },
    BlockRule {
        name: "details",
        parse: details,
    },
];

/// Applies the block rules to one line. A line no rule claims is a
/// paragraph line and is inline parsed in full.
pub fn parse_block(line: &LineInput<'_>) -> BlockOutcome {
    BLOCK_RULES
        .iter()
        .find_map(|rule| (rule.parse)(line))
        .unwrap_or_else(|| BlockOutcome::then_inline(vec![], line.whole()))
}

/// A fence marker line. The block itself is produced by the region pass.
fn code_fence(line: &LineInput<'_>) -> Option<BlockOutcome> {
    CodeFence::open(line.text).map(|_| BlockOutcome::stop(vec![]))
}

fn block_formula(line: &LineInput<'_>) -> Option<BlockOutcome> {
    match MathFence::classify(line.text)? {
        MathLine::Open(_) => Some(BlockOutcome::stop(vec![])),
        MathLine::Complete(body) => {
            let source = line.slice(body).trim();
            if !is_valid_formula(source) {
                return Some(BlockOutcome::stop(vec![]));
            }
            let el = ParsedElement::replace(ElementType::MathBlock, line.abs(line.whole()), line.number)
                .with_content(line.slice(body), line.abs(body))
                .with_formula(source)
                .with_detail(ElementDetail::Formula)
                .block();
            Some(BlockOutcome::stop(vec![el]))
        }
    }
}

fn heading(line: &LineInput<'_>) -> Option<BlockOutcome> {
    let h = Heading::parse(line.text)?;
    let mut elements =
        vec![ParsedElement::line_style(ElementType::Heading, line.start, line.number).with_level(h.level)];
    if h.text.is_empty() {
        return Some(BlockOutcome::stop(elements));
    }
    elements.push(
        ParsedElement::replace(ElementType::Heading, line.abs(line.whole()), line.number)
            .with_content(line.slice(h.text), line.abs(h.text))
            .with_level(h.level)
            .block(),
    );
    Some(BlockOutcome::then_inline(elements, h.text))
}

fn blockquote(line: &LineInput<'_>) -> Option<BlockOutcome> {
    let (depth, body_start) = BlockQuote::strip_prefixes(line.text);
    if depth == 0 {
        return None;
    }
    let body = Span::new(body_start, line.text.trim_end().len().max(body_start));

    if let Some(tag) = BlockQuote::callout(line.slice(body)) {
        let title = tag.title.shift(body_start);
        let detail = ElementDetail::Callout {
            kind: tag.kind,
            folded: tag.folded,
        };
        let elements = vec![
            ParsedElement::line_style(ElementType::Callout, line.start, line.number)
                .with_level(depth)
                .with_detail(detail.clone()),
            ParsedElement::replace(
                ElementType::Callout,
                line.abs(Span::new(0, body_start + tag.tag_end)),
                line.number,
            )
            .with_content(line.slice(title), line.abs(title))
            .with_level(depth)
            .with_detail(detail)
            .block(),
        ];
        return Some(BlockOutcome::then_inline(elements, title));
    }

    let mut elements =
        vec![ParsedElement::line_style(ElementType::Blockquote, line.start, line.number).with_level(depth)];
    if line.slice(body).trim().is_empty() {
        return Some(BlockOutcome::stop(elements));
    }
    elements.push(
        ParsedElement::replace(ElementType::Blockquote, line.abs(Span::new(0, body_start)), line.number)
            .with_level(depth)
            .block(),
    );
    Some(BlockOutcome::then_inline(elements, body))
}

fn list_item(line: &LineInput<'_>) -> Option<BlockOutcome> {
    let item = ListItem::parse(line.text)?;
    let detail = ElementDetail::ListItem {
        marker: item.marker,
        task: item.task,
    };
    let elements = vec![
        ParsedElement::line_style(ElementType::ListItem, line.start, line.number)
            .with_level(item.level)
            .with_detail(detail.clone()),
        ParsedElement::replace(ElementType::ListItem, line.abs(item.marker_span), line.number)
            .with_level(item.level)
            .with_detail(detail)
            .block(),
    ];
    Some(BlockOutcome::then_inline(elements, item.body))
}

fn horizontal_rule(line: &LineInput<'_>) -> Option<BlockOutcome> {
    HorizontalRule::matches(line.text).then(|| {
        BlockOutcome::stop(vec![
            ParsedElement::replace(ElementType::HorizontalRule, line.abs(line.whole()), line.number).block(),
        ])
    })
}

fn table_row(line: &LineInput<'_>) -> Option<BlockOutcome> {
    let row = Table::parse(line.text)?;
    let cells = row
        .cells
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            ParsedElement::replace(ElementType::Table, line.abs(cell.span()), line.number)
                .with_content(line.slice(cell.text), line.abs(cell.text))
                .with_detail(ElementDetail::TableCell { column })
        })
        .collect();
    let el = ParsedElement::line_style(ElementType::Table, line.start, line.number)
        .with_detail(ElementDetail::TableRow {
            delimiter: row.delimiter,
        })
        .with_children(cells);
    if row.delimiter {
        Some(BlockOutcome::stop(vec![el]))
    } else {
        let texts = row.cells.iter().map(|c| c.text).collect();
        Some(BlockOutcome::then_inline_each(vec![el], texts))
    }
}

fn details(line: &LineInput<'_>) -> Option<BlockOutcome> {
    let d = Details::parse(line.text)?;
    let mut el = ParsedElement::replace(ElementType::Details, line.abs(line.whole()), line.number)
        .with_detail(ElementDetail::Details { tag: d.tag })
        .block();
    if let Some(summary) = d.summary {
        el = el.with_content(line.slice(summary), line.abs(summary));
    }
    Some(BlockOutcome::stop(vec![el]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::element::{Decoration, DetailsTag, ListMarker};
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> BlockOutcome {
        parse_block(&LineInput {
            number: 0,
            start: 0,
            text,
        })
    }

    fn summary(out: &BlockOutcome) -> Vec<(ElementType, Decoration, usize, usize)> {
        out.elements
            .iter()
            .map(|e| (e.kind, e.decoration, e.from, e.to))
            .collect()
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = BLOCK_RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BLOCK_RULES.len());
    }

    #[test]
    fn heading_hello() {
        let out = run("# Hello");
        assert_eq!(
            summary(&out),
            vec![
                (ElementType::Heading, Decoration::LineStyle, 0, 0),
                (ElementType::Heading, Decoration::Replace, 0, 7),
            ]
        );
        assert_eq!(out.elements[0].level, Some(1));
        assert_eq!(out.elements[1].content.as_deref(), Some("Hello"));
        assert_eq!(out.inline, vec![Span::new(2, 7)]);
    }

    #[test]
    fn empty_heading_is_style_only() {
        let out = run("##");
        assert_eq!(summary(&out), vec![(ElementType::Heading, Decoration::LineStyle, 0, 0)]);
        assert!(out.inline.is_empty());
    }

    #[test]
    fn absolute_offsets_follow_line_start() {
        let out = parse_block(&LineInput {
            number: 3,
            start: 40,
            text: "## Two",
        });
        assert_eq!(out.elements[1].span(), Span::new(40, 46));
        assert_eq!(out.elements[1].content_span, Some(Span::new(43, 46)));
        assert_eq!(out.elements[1].line_number, 3);
    }

    #[test]
    fn blockquote_replaces_marker_only() {
        let out = run("> > quoted");
        assert_eq!(
            summary(&out),
            vec![
                (ElementType::Blockquote, Decoration::LineStyle, 0, 0),
                (ElementType::Blockquote, Decoration::Replace, 0, 4),
            ]
        );
        assert_eq!(out.elements[0].level, Some(2));
        assert_eq!(out.inline, vec![Span::new(4, 10)]);
    }

    #[test]
    fn empty_blockquote_is_style_only() {
        let out = run(">");
        assert_eq!(out.elements.len(), 1);
        assert!(out.elements[0].is_line_style());
    }

    #[test]
    fn callout_replaces_marker_and_tag() {
        let out = run("> [!tip]+ Try *this*");
        assert_eq!(
            summary(&out),
            vec![
                (ElementType::Callout, Decoration::LineStyle, 0, 0),
                (ElementType::Callout, Decoration::Replace, 0, 10),
            ]
        );
        assert_eq!(out.elements[1].content.as_deref(), Some("Try *this*"));
        assert_eq!(
            out.elements[1].detail,
            ElementDetail::Callout {
                kind: "tip".into(),
                folded: Some(false)
            }
        );
        assert_eq!(out.inline, vec![Span::new(10, 20)]);
    }

    #[test]
    fn task_list_item() {
        let out = run("- [x] done");
        assert_eq!(
            summary(&out),
            vec![
                (ElementType::ListItem, Decoration::LineStyle, 0, 0),
                (ElementType::ListItem, Decoration::Replace, 0, 5),
            ]
        );
        assert_eq!(
            out.elements[1].detail,
            ElementDetail::ListItem {
                marker: ListMarker::Bullet('-'),
                task: Some(true)
            }
        );
        assert_eq!(out.inline, vec![Span::new(6, 10)]);
    }

    #[test]
    fn horizontal_rule_short_circuits() {
        let out = run("***");
        assert_eq!(summary(&out), vec![(ElementType::HorizontalRule, Decoration::Replace, 0, 3)]);
        assert!(out.inline.is_empty());
    }

    #[test]
    fn fence_and_formula_openers_stop_parsing() {
        for line in ["```rust", "~~~", "$$", "$$ a +"] {
            let out = run(line);
            assert!(out.elements.is_empty(), "{line}");
            assert!(out.inline.is_empty(), "{line}");
        }
    }

    #[test]
    fn single_line_block_formula() {
        let out = run("$$ x^2 $$");
        assert_eq!(summary(&out), vec![(ElementType::MathBlock, Decoration::Replace, 0, 9)]);
        assert_eq!(out.elements[0].formula_source.as_deref(), Some("x^2"));
    }

    #[test]
    fn placeholder_block_formula_is_dropped() {
        assert!(run("$$ TeX $$").elements.is_empty());
        assert!(run("$$$$").elements.is_empty());
    }

    #[test]
    fn table_rows_carry_cells() {
        let out = run("| a | b |");
        let row = &out.elements[0];
        assert_eq!(row.kind, ElementType::Table);
        assert!(row.is_line_style());
        let cells: Vec<_> = row.children.iter().map(|c| c.content.clone().unwrap_or_default()).collect();
        assert_eq!(cells, vec!["a", "b"]);
        let spans: Vec<_> = row.children.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(spans, vec![(0, 3), (4, 7)]);
        assert_eq!(out.inline, vec![Span::new(2, 3), Span::new(6, 7)]);

        let delim = run("|---|---|");
        assert_eq!(delim.elements[0].detail, ElementDetail::TableRow { delimiter: true });
        assert!(delim.inline.is_empty());
    }

    #[test]
    fn details_summary() {
        let out = run("<summary>Open me</summary>");
        assert_eq!(out.elements[0].kind, ElementType::Details);
        assert_eq!(out.elements[0].content.as_deref(), Some("Open me"));
        assert_eq!(
            out.elements[0].detail,
            ElementDetail::Details {
                tag: DetailsTag::Summary
            }
        );
    }

    #[test]
    fn paragraph_is_inline_parsed_in_full() {
        let out = run("just text");
        assert!(out.elements.is_empty());
        assert_eq!(out.inline, vec![Span::new(0, 9)]);
    }
}
