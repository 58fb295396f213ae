use crate::parsing::{element::ElementType, rope::span::Span};

/// A raw inline match with spans local to the scanned line text.
///
/// Matchers only produce spans; payloads are built by the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Full syntax span including delimiters.
    pub span: Span,
    /// Content span with delimiters stripped.
    pub content: Span,
    /// Capture sub-spans (regex groups 1..), family specific.
    pub parts: Vec<Option<Span>>,
}

impl RawMatch {
    /// Text of capture `i`, if it participated in the match.
    pub fn part<'a>(&self, s: &'a str, i: usize) -> Option<&'a str> {
        self.parts
            .get(i)
            .copied()
            .flatten()
            .map(|sp| &s[sp.start..sp.end])
    }

    pub fn content_text<'a>(&self, s: &'a str) -> &'a str {
        &s[self.content.start..self.content.end]
    }
}

/// The sixteen inline syntax families, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineFamily {
    Formula,
    BoldItalic,
    Bold,
    Italic,
    Strikethrough,
    Highlight,
    InlineCode,
    AnnotationLink,
    WikiLink,
    MarkdownLink,
    Embed,
    Image,
    Superscript,
    Subscript,
    KeyboardKey,
    FootnoteRef,
}

impl InlineFamily {
    /// The element kind (and so the priority) a family's matches carry.
    pub const fn element_type(self) -> ElementType {
        match self {
            InlineFamily::Formula => ElementType::MathInline,
            InlineFamily::BoldItalic | InlineFamily::Bold => ElementType::InlineBold,
            InlineFamily::Italic => ElementType::InlineItalic,
            InlineFamily::InlineCode => ElementType::InlineCode,
            InlineFamily::AnnotationLink | InlineFamily::WikiLink | InlineFamily::MarkdownLink => {
                ElementType::InlineLink
            }
            InlineFamily::Embed | InlineFamily::Image => ElementType::InlineImage,
            InlineFamily::Strikethrough
            | InlineFamily::Highlight
            | InlineFamily::Superscript
            | InlineFamily::Subscript
            | InlineFamily::KeyboardKey
            | InlineFamily::FootnoteRef => ElementType::InlineOther,
        }
    }
}
