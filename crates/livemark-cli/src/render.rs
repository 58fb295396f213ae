//! Terminal decoration mapper: turns one line of text plus its resolved
//! elements into styled ratatui spans. Replace elements hide their syntax
//! and draw a rendered form; line styles tint the whole line.

use livemark_engine::{
    Decoration, ElementDetail, ElementType, ParsedElement,
    parsing::element::{DetailsTag, InlineStyle, ListMarker},
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Whether a line sits inside a multi-line block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLine {
    CodeMarker,
    Code,
    MathMarker,
    Math,
}

pub fn code_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn math_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Raw text with the cursor cell reversed. Used for revealed lines.
pub fn render_raw(text: &str, cursor: Option<usize>) -> Line<'static> {
    let Some(col) = cursor else {
        return Line::from(text.to_string());
    };
    let col = col.min(text.len());
    let cursor_end = text[col..]
        .chars()
        .next()
        .map_or(col, |c| col + c.len_utf8());
    let under = if cursor_end > col { &text[col..cursor_end] } else { " " };
    Line::from(vec![
        Span::raw(text[..col].to_string()),
        Span::styled(under.to_string(), Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(text[cursor_end..].to_string()),
    ])
}

/// Renders a line that belongs to a code block or block formula.
pub fn render_block_line(text: &str, kind: BlockLine) -> Line<'static> {
    match kind {
        BlockLine::CodeMarker | BlockLine::MathMarker => Line::from(Span::styled(
            "─".repeat(text.chars().count().max(3)),
            Style::default().fg(Color::DarkGray),
        )),
        BlockLine::Code => Line::from(Span::styled(text.to_string(), code_style())),
        BlockLine::Math => Line::from(Span::styled(text.to_string(), math_style())),
    }
}

/// Renders `text` (one line without terminator, starting at absolute
/// offset `line_start`) with the elements that belong to it.
pub fn render_line(text: &str, line_start: usize, elements: &[&ParsedElement]) -> Line<'static> {
    let base = elements
        .iter()
        .filter(|el| el.decoration == Decoration::LineStyle)
        .fold(Style::default(), |style, el| style.patch(line_style(el)));

    let mut table_row = false;
    let mut replaced: Vec<&ParsedElement> = vec![];
    for &el in elements {
        match (&el.decoration, &el.detail) {
            (Decoration::LineStyle, ElementDetail::TableRow { delimiter: true }) => {
                return Line::from(Span::styled(
                    "─".repeat(text.chars().count()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            (Decoration::LineStyle, ElementDetail::TableRow { .. }) => {
                table_row = true;
                replaced.extend(el.children.iter());
            }
            (Decoration::Replace, _) => replaced.push(el),
            _ => {}
        }
    }
    let ctx = Segment {
        text,
        line_start,
        table_row,
    };
    let spans = ctx.render(line_start, line_start + text.len(), &replaced, base);
    Line::from(spans)
}

struct Segment<'a> {
    text: &'a str,
    line_start: usize,
    /// Draw unclaimed `|` as box rules.
    table_row: bool,
}

impl Segment<'_> {
    fn slice(&self, from: usize, to: usize) -> &str {
        let from = from.saturating_sub(self.line_start).min(self.text.len());
        let to = to.saturating_sub(self.line_start).clamp(from, self.text.len());
        self.text.get(from..to).unwrap_or("")
    }

    fn gap(&self, from: usize, to: usize, style: Style) -> Span<'static> {
        let raw = self.slice(from, to);
        let text = if self.table_row {
            raw.replace('|', "│")
        } else {
            raw.to_string()
        };
        Span::styled(text, style)
    }

    /// Renders `[from, to)`, drawing outermost elements and recursing into
    /// their content for nested ones.
    fn render(
        &self,
        from: usize,
        to: usize,
        elements: &[&ParsedElement],
        style: Style,
    ) -> Vec<Span<'static>> {
        let mut sorted: Vec<&ParsedElement> = elements
            .iter()
            .copied()
            .filter(|el| el.from >= from && el.to <= to)
            .collect();
        sorted.sort_by_key(|el| (el.from, std::cmp::Reverse(el.to)));

        let mut out = vec![];
        let mut pos = from;
        for el in &sorted {
            if el.from < pos {
                continue;
            }
            if el.from > pos {
                out.push(self.gap(pos, el.from, style));
            }
            let inner: Vec<&ParsedElement> = sorted
                .iter()
                .copied()
                .filter(|o| !std::ptr::eq(*o, *el) && o.from >= el.from && o.to <= el.to)
                .collect();
            out.extend(self.render_element(el, &inner, style));
            pos = el.to;
        }
        if pos < to {
            out.push(self.gap(pos, to, style));
        }
        out
    }

    fn render_element(
        &self,
        el: &ParsedElement,
        inner: &[&ParsedElement],
        style: Style,
    ) -> Vec<Span<'static>> {
        let styled_content = |extra: Style| -> Vec<Span<'static>> {
            match el.content_span {
                Some(cs) if cs.start >= el.from && cs.end <= el.to => {
                    self.render(cs.start, cs.end, inner, style.patch(extra))
                }
                _ => vec![Span::styled(
                    el.content.clone().unwrap_or_default(),
                    style.patch(extra),
                )],
            }
        };
        let text = |s: String, extra: Style| vec![Span::styled(s, style.patch(extra))];

        match (el.kind, &el.detail) {
            (ElementType::Table, ElementDetail::TableCell { .. }) => {
                // the cell opens at its pipe
                let mut spans = text("│".into(), Style::default());
                spans.extend(self.render(el.from + 1, el.to, inner, style));
                spans
            }
            (ElementType::Heading, _) => styled_content(Style::default().add_modifier(Modifier::BOLD)),
            (ElementType::Blockquote, _) => {
                text("│ ".repeat(el.level.unwrap_or(1) as usize), Style::default().fg(Color::DarkGray))
            }
            (ElementType::Callout, ElementDetail::Callout { kind, folded }) => {
                let fold = match folded {
                    Some(true) => " ▸",
                    Some(false) => " ▾",
                    None => "",
                };
                text(
                    format!("▌ {}{fold} ", kind.to_uppercase()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )
            }
            (ElementType::ListItem, ElementDetail::ListItem { marker, task }) => {
                let indent = "  ".repeat(el.level.unwrap_or(1).saturating_sub(1) as usize);
                let bullet = match (task, marker) {
                    (Some(true), _) => "☑".to_string(),
                    (Some(false), _) => "☐".to_string(),
                    (None, ListMarker::Bullet(_)) => "•".to_string(),
                    (None, ListMarker::Ordered(n)) => format!("{n}."),
                };
                text(format!("{indent}{bullet}"), Style::default().fg(Color::Magenta))
            }
            (ElementType::HorizontalRule, _) => {
                text("─".repeat(20), Style::default().fg(Color::DarkGray))
            }
            (ElementType::Details, ElementDetail::Details { tag }) => match tag {
                DetailsTag::Summary => {
                    let mut spans = text("▸ ".into(), Style::default());
                    spans.extend(styled_content(Style::default().add_modifier(Modifier::BOLD)));
                    spans
                }
                DetailsTag::Open | DetailsTag::Close => {
                    text("┄".repeat(3), Style::default().fg(Color::DarkGray))
                }
            },
            (ElementType::MathBlock | ElementType::MathInline, _) => text(
                el.formula_source.clone().unwrap_or_default(),
                math_style(),
            ),
            (ElementType::CodeBlock | ElementType::InlineCode, _) => {
                text(el.content.clone().unwrap_or_default(), code_style())
            }
            (ElementType::InlineBold, ElementDetail::Style(InlineStyle::BoldItalic)) => {
                styled_content(Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC))
            }
            (ElementType::InlineBold, _) => styled_content(Style::default().add_modifier(Modifier::BOLD)),
            (ElementType::InlineItalic, _) => styled_content(Style::default().add_modifier(Modifier::ITALIC)),
            (ElementType::InlineLink, _) => styled_content(
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            (ElementType::InlineImage, _) => {
                let mut spans = text("🖼 ".into(), Style::default());
                spans.extend(styled_content(Style::default().fg(Color::Blue)));
                spans
            }
            (ElementType::InlineOther, ElementDetail::Style(s)) => match s {
                InlineStyle::Strikethrough => {
                    styled_content(Style::default().add_modifier(Modifier::CROSSED_OUT))
                }
                InlineStyle::Highlight => {
                    styled_content(Style::default().bg(Color::Yellow).fg(Color::Black))
                }
                InlineStyle::Superscript => {
                    let mut spans = text("^".into(), Style::default());
                    spans.extend(styled_content(Style::default()));
                    spans
                }
                InlineStyle::Subscript => {
                    let mut spans = text("_".into(), Style::default());
                    spans.extend(styled_content(Style::default()));
                    spans
                }
                InlineStyle::Keyboard => text(
                    format!("[{}]", el.content.clone().unwrap_or_default()),
                    Style::default().add_modifier(Modifier::REVERSED),
                ),
                _ => styled_content(Style::default()),
            },
            (ElementType::InlineOther, ElementDetail::FootnoteRef { id }) => {
                text(format!("[{id}]"), Style::default().fg(Color::Cyan))
            }
            _ => text(self.slice(el.from, el.to).to_string(), Style::default()),
        }
    }
}

fn line_style(el: &ParsedElement) -> Style {
    match el.kind {
        ElementType::Heading => match el.level {
            Some(1) => Style::default().fg(Color::LightMagenta),
            Some(2) => Style::default().fg(Color::LightBlue),
            _ => Style::default().fg(Color::LightCyan),
        },
        ElementType::Blockquote => Style::default().add_modifier(Modifier::ITALIC),
        ElementType::Callout => Style::default().fg(Color::Cyan),
        ElementType::Table => Style::default().fg(Color::White),
        _ => Style::default(),
    }
}
