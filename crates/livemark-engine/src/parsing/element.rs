//! # Parsed Elements
//!
//! The output vocabulary of the parser: one [`ParsedElement`] per recognized
//! syntactic unit, tagged with an [`ElementType`] whose numeric priority
//! drives conflict resolution.

use std::cmp::Ordering;

use serde::Serialize;

use super::rope::span::Span;

/// Kind of a parsed element.
///
/// Priority is the explicit number returned by [`ElementType::priority`];
/// the order of the variants below carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    CodeBlock,
    MathBlock,
    MathInline,
    Table,
    Callout,
    Details,
    Heading,
    Blockquote,
    ListItem,
    HorizontalRule,
    InlineBold,
    InlineItalic,
    InlineCode,
    InlineLink,
    InlineImage,
    InlineOther,
}

impl ElementType {
    pub const ALL: [ElementType; 16] = [
        ElementType::CodeBlock,
        ElementType::MathBlock,
        ElementType::MathInline,
        ElementType::Table,
        ElementType::Callout,
        ElementType::Details,
        ElementType::Heading,
        ElementType::Blockquote,
        ElementType::ListItem,
        ElementType::HorizontalRule,
        ElementType::InlineBold,
        ElementType::InlineItalic,
        ElementType::InlineCode,
        ElementType::InlineLink,
        ElementType::InlineImage,
        ElementType::InlineOther,
    ];

    /// Total order used by the conflict resolver. Lower wins.
    pub const fn priority(self) -> u8 {
        match self {
            ElementType::CodeBlock => 1,
            ElementType::MathBlock => 2,
            ElementType::MathInline => 3,
            ElementType::Table => 4,
            ElementType::Callout => 5,
            ElementType::Details => 6,
            ElementType::Heading => 7,
            ElementType::Blockquote => 8,
            ElementType::ListItem => 9,
            ElementType::HorizontalRule => 10,
            ElementType::InlineBold => 11,
            ElementType::InlineItalic => 12,
            ElementType::InlineCode => 13,
            ElementType::InlineLink => 14,
            ElementType::InlineImage => 15,
            ElementType::InlineOther => 16,
        }
    }

    /// Raw zones admit no other element inside their span.
    pub const fn is_raw_zone(self) -> bool {
        matches!(
            self,
            ElementType::CodeBlock
                | ElementType::MathBlock
                | ElementType::MathInline
                | ElementType::InlineCode
        )
    }
}

impl PartialOrd for ElementType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ElementType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

/// How the mapper should treat the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Decoration {
    /// Zero-width per-line style. Never hides text.
    LineStyle,
    /// Hides `[from, to)` and substitutes a rendered form.
    Replace,
}

/// Inline styling families that carry no payload beyond their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InlineStyle {
    BoldItalic,
    Bold,
    Italic,
    Strikethrough,
    Highlight,
    Superscript,
    Subscript,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListMarker {
    /// `-`, `*` or `+`.
    Bullet(char),
    /// `1.` or `1)`; carries the number.
    Ordered(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetailsTag {
    Open,
    Close,
    Summary,
}

/// Family-specific payload carried through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElementDetail {
    None,
    Callout {
        kind: String,
        /// `Some(true)` for `-` (collapsed), `Some(false)` for `+`.
        folded: Option<bool>,
    },
    ListItem {
        marker: ListMarker,
        /// `Some(checked)` for task items.
        task: Option<bool>,
    },
    TableRow {
        delimiter: bool,
    },
    TableCell {
        column: usize,
    },
    Details {
        tag: DetailsTag,
    },
    CodeFence {
        fence: char,
        closed: bool,
    },
    Style(InlineStyle),
    Code,
    Formula,
    Link {
        target: String,
        title: Option<String>,
    },
    WikiLink {
        target: String,
        heading: Option<String>,
        alias: Option<String>,
    },
    AnnotationLink {
        pdf: String,
        annotation_id: String,
    },
    Embed {
        target: String,
        heading: Option<String>,
        alias: Option<String>,
    },
    Image {
        src: String,
        title: Option<String>,
    },
    FootnoteRef {
        id: String,
    },
}

/// Identity of an element for reveal tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementKey {
    pub kind: ElementType,
    pub from: usize,
    pub to: usize,
}

impl ElementKey {
    pub fn span(self) -> Span {
        Span::new(self.from, self.to)
    }
}

/// One recognized syntactic unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedElement {
    pub kind: ElementType,
    /// Absolute syntax span start (delimiters included).
    pub from: usize,
    /// Absolute syntax span end, exclusive.
    pub to: usize,
    pub line_number: usize,
    pub content: Option<String>,
    /// Absolute span of `content` (delimiters stripped).
    pub content_span: Option<Span>,
    pub level: Option<u8>,
    pub language: Option<String>,
    pub formula_source: Option<String>,
    pub is_block: bool,
    pub decoration: Decoration,
    pub detail: ElementDetail,
    pub children: Vec<ParsedElement>,
}

impl ParsedElement {
    pub fn new(kind: ElementType, span: Span, line_number: usize, decoration: Decoration) -> Self {
        Self {
            kind,
            from: span.start,
            to: span.end,
            line_number,
            content: None,
            content_span: None,
            level: None,
            language: None,
            formula_source: None,
            is_block: false,
            decoration,
            detail: ElementDetail::None,
            children: Vec::new(),
        }
    }

    /// A zero-width style element at `at`.
    pub fn line_style(kind: ElementType, at: usize, line_number: usize) -> Self {
        Self::new(kind, Span::new(at, at), line_number, Decoration::LineStyle).block()
    }

    pub fn replace(kind: ElementType, span: Span, line_number: usize) -> Self {
        Self::new(kind, span, line_number, Decoration::Replace)
    }

    #[must_use]
    pub fn with_content(mut self, text: impl Into<String>, span: Span) -> Self {
        self.content = Some(text.into());
        self.content_span = Some(span);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_formula(mut self, source: impl Into<String>) -> Self {
        self.formula_source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: ElementDetail) -> Self {
        self.detail = detail;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<ParsedElement>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn block(mut self) -> Self {
        self.is_block = true;
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn key(&self) -> ElementKey {
        ElementKey {
            kind: self.kind,
            from: self.from,
            to: self.to,
        }
    }

    pub fn is_line_style(&self) -> bool {
        self.decoration == Decoration::LineStyle
    }

    /// Moves every offset (children included) forward by `delta`.
    pub fn shifted(&self, delta: usize) -> Self {
        self.map_spans(&|sp| sp.shift(delta))
    }

    /// Moves every offset (children included) back by `delta`.
    pub fn unshifted(&self, delta: usize) -> Self {
        self.map_spans(&|sp| sp.unshift(delta))
    }

    /// Clamps every offset into `[0, len]` for consumers that must never
    /// index out of bounds.
    pub fn clamped(&self, len: usize) -> Self {
        self.map_spans(&|sp| Span::new(sp.start.min(len), sp.end.min(len)))
    }

    fn map_spans(&self, f: &dyn Fn(Span) -> Span) -> Self {
        let span = f(self.span());
        Self {
            from: span.start,
            to: span.end,
            content_span: self.content_span.map(f),
            children: self.children.iter().map(|c| c.map_spans(f)).collect(),
            ..self.clone()
        }
    }
}
