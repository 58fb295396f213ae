//! Multi-line regions: fenced code blocks and `$$` block formulas.
//!
//! Regions are found by a document-level pass that ignores reveal state
//! and the line cache. Every line inside a region, markers included, is a
//! raw zone and is never handed to the line parser.

use xi_rope::Rope;

use super::kinds::{CodeFence, FenceOpen, MathFence, MathLine};
use crate::parsing::{
    element::{ElementDetail, ElementKey, ElementType, ParsedElement},
    inline::kinds::math::is_valid_formula,
    rope::{
        lines::{LineRef, lines_with_spans},
        span::Span,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionKind {
    Code { open: FenceOpen, closed: bool },
    Math,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub first_line: usize,
    /// Inclusive.
    pub last_line: usize,
    /// Opening line start to closing line end (terminator excluded).
    pub span: Span,
    /// The text between the markers.
    pub inner: Span,
}

impl Region {
    pub fn contains_line(&self, line: usize) -> bool {
        (self.first_line..=self.last_line).contains(&line)
    }

    pub fn element_type(&self) -> ElementType {
        match self.kind {
            RegionKind::Code { .. } => ElementType::CodeBlock,
            RegionKind::Math => ElementType::MathBlock,
        }
    }

    pub fn key(&self) -> ElementKey {
        ElementKey {
            kind: self.element_type(),
            from: self.span.start,
            to: self.span.end,
        }
    }

    /// Builds the block element. A formula whose source is empty or a
    /// placeholder yields nothing, though its lines stay raw.
    pub fn to_element(&self, rope: &Rope) -> Option<ParsedElement> {
        let content = rope.slice_to_cow(self.inner.start..self.inner.end).into_owned();
        let el = ParsedElement::replace(self.element_type(), self.span, self.first_line).block();
        match &self.kind {
            RegionKind::Code { open, closed } => Some(
                el.with_language(open.language())
                    .with_detail(ElementDetail::CodeFence {
                        fence: open.fence as char,
                        closed: *closed,
                    })
                    .with_content(content, self.inner),
            ),
            RegionKind::Math => {
                let source = content.trim();
                if !is_valid_formula(source) {
                    return None;
                }
                Some(
                    el.with_formula(source)
                        .with_detail(ElementDetail::Formula)
                        .with_content(content.as_str(), self.inner),
                )
            }
        }
    }
}

/// The regions of one document version, ordered by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    regions: Vec<Region>,
}

impl RegionMap {
    /// Scans the whole document. Call again after every text change.
    pub fn scan(rope: &Rope) -> Self {
        let lines: Vec<LineRef> = lines_with_spans(rope).collect();
        Self {
            regions: scan_regions(&lines),
        }
    }

    /// The region covering `line`, if any.
    pub fn containing(&self, line: usize) -> Option<&Region> {
        let i = self.regions.partition_point(|r| r.last_line < line);
        self.regions.get(i).filter(|r| r.contains_line(line))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

/// Finds every region in document order.
///
/// A code fence closes on a line with a run of at least as many of the
/// same fence character and nothing else; an unclosed fence runs to the
/// last line. A formula closes on the next line ending with `$$`; an
/// unclosed `$$` is not a region and scanning resumes on the next line.
pub fn scan_regions(lines: &[LineRef]) -> Vec<Region> {
    let mut out = vec![];
    let mut i = 0;
    while i < lines.len() {
        let text = lines[i].content();

        if let Some(open) = CodeFence::open(text) {
            let close = (i + 1..lines.len()).find(|&j| CodeFence::closes(&open, lines[j].content()));
            let last = close.unwrap_or(lines.len() - 1);
            let inner_end = match close {
                Some(j) => lines[j].span.start,
                None => lines[last].content_span().end,
            };
            let inner_start = inner_start(lines, i).min(inner_end);
            out.push(Region {
                kind: RegionKind::Code {
                    open,
                    closed: close.is_some(),
                },
                first_line: i,
                last_line: last,
                span: Span::new(lines[i].span.start, lines[last].content_span().end),
                inner: Span::new(inner_start, trim_newline(lines, inner_start, inner_end)),
            });
            i = last + 1;
            continue;
        }

        if let Some(MathLine::Open(tail)) = MathFence::classify(text) {
            let close = (i + 1..lines.len()).find_map(|j| MathFence::close(lines[j].content()).map(|sp| (j, sp)));
            if let Some((j, body)) = close {
                out.push(Region {
                    kind: RegionKind::Math,
                    first_line: i,
                    last_line: j,
                    span: Span::new(lines[i].span.start, lines[j].content_span().end),
                    inner: Span::new(lines[i].span.start + tail.start, lines[j].span.start + body.end),
                });
                i = j + 1;
                continue;
            }
        }

        i += 1;
    }
    out
}

/// Start of the line after `i`, or the end of line `i` at EOF.
fn inner_start(lines: &[LineRef], i: usize) -> usize {
    lines
        .get(i + 1)
        .map_or_else(|| lines[i].content_span().end, |l| l.span.start)
}

/// Pulls `end` back over the terminator of the last inner line.
fn trim_newline(lines: &[LineRef], start: usize, end: usize) -> usize {
    let text = text_in(lines, Span::new(start, end));
    start + text.trim_end_matches(['\r', '\n']).len()
}

/// Concatenated document text inside `span`.
fn text_in(lines: &[LineRef], span: Span) -> String {
    let mut out = String::new();
    for l in lines {
        if l.span.end <= span.start {
            continue;
        }
        if l.span.start >= span.end {
            break;
        }
        let from = span.start.max(l.span.start) - l.span.start;
        let to = span.end.min(l.span.end) - l.span.start;
        out.push_str(&l.text[from..to]);
    }
    out
}
