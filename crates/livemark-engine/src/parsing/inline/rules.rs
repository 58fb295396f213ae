//! The ordered inline pattern table.
//!
//! Each entry pairs a matcher (text → raw spans) with a builder (raw match →
//! payload, or `None` to reject). Adding a syntax is a table append.
//! Table order is scan order; it also decides which payload survives when
//! two families produce the same span and kind.

use super::{
    kinds::{CodeSpan, InlineMath, WikiLink, emphasis, kbd, link, math::is_valid_formula},
    types::{InlineFamily, RawMatch},
};
use crate::parsing::element::{ElementDetail, InlineStyle};

pub type Matcher = fn(&str) -> Vec<RawMatch>;
pub type Builder = fn(&str, &RawMatch) -> Option<ElementDetail>;

pub struct InlineRule {
    pub family: InlineFamily,
    pub find: Matcher,
    pub build: Builder,
}

pub static INLINE_RULES: &[InlineRule] = &[
    InlineRule {
        family: InlineFamily::Formula,
        find: InlineMath::find,
        build: build_formula,
    },
    InlineRule {
        family: InlineFamily::BoldItalic,
        find: emphasis::find_bold_italic,
        build: build_bold_italic,
    },
    InlineRule {
        family: InlineFamily::Bold,
        find: emphasis::find_bold,
        build: build_bold,
    },
    InlineRule {
        family: InlineFamily::Italic,
        find: emphasis::find_italic,
        build: build_italic,
    },
    InlineRule {
        family: InlineFamily::Strikethrough,
        find: emphasis::find_strikethrough,
        build: build_strikethrough,
    },
    InlineRule {
        family: InlineFamily::Highlight,
        find: emphasis::find_highlight,
        build: build_highlight,
    },
    InlineRule {
        family: InlineFamily::InlineCode,
        find: CodeSpan::find,
        build: build_code,
    },
    InlineRule {
        family: InlineFamily::AnnotationLink,
        find: link::find_annotation_links,
        build: build_annotation_link,
    },
    InlineRule {
        family: InlineFamily::WikiLink,
        find: WikiLink::find_links,
        build: build_wiki_link,
    },
    InlineRule {
        family: InlineFamily::MarkdownLink,
        find: link::find_markdown_links,
        build: build_markdown_link,
    },
    InlineRule {
        family: InlineFamily::Embed,
        find: WikiLink::find_embeds,
        build: build_embed,
    },
    InlineRule {
        family: InlineFamily::Image,
        find: link::find_images,
        build: build_image,
    },
    InlineRule {
        family: InlineFamily::Superscript,
        find: emphasis::find_superscript,
        build: build_superscript,
    },
    InlineRule {
        family: InlineFamily::Subscript,
        find: emphasis::find_subscript,
        build: build_subscript,
    },
    InlineRule {
        family: InlineFamily::KeyboardKey,
        find: kbd::find_keys,
        build: build_keyboard,
    },
    InlineRule {
        family: InlineFamily::FootnoteRef,
        find: link::find_footnote_refs,
        build: build_footnote,
    },
];

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

fn build_formula(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    is_valid_formula(m.content_text(s)).then_some(ElementDetail::Formula)
}

fn build_bold_italic(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::BoldItalic))
}

fn build_bold(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Bold))
}

fn build_italic(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Italic))
}

fn build_strikethrough(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Strikethrough))
}

fn build_highlight(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Highlight))
}

fn build_superscript(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Superscript))
}

fn build_subscript(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Subscript))
}

fn build_keyboard(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Style(InlineStyle::Keyboard))
}

fn build_code(_: &str, _: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Code)
}

fn build_annotation_link(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::AnnotationLink {
        pdf: m.part(s, 1)?.to_string(),
        annotation_id: m.part(s, 2)?.to_string(),
    })
}

fn build_wiki_link(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::WikiLink {
        target: m.part(s, 0)?.trim().to_string(),
        heading: owned(m.part(s, 1)),
        alias: owned(m.part(s, 2)),
    })
}

fn build_embed(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Embed {
        target: m.part(s, 0)?.trim().to_string(),
        heading: owned(m.part(s, 1)),
        alias: owned(m.part(s, 2)),
    })
}

fn build_markdown_link(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Link {
        target: m.part(s, 1)?.to_string(),
        title: owned(m.part(s, 2)),
    })
}

fn build_image(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::Image {
        src: m.part(s, 1)?.to_string(),
        title: owned(m.part(s, 2)),
    })
}

fn build_footnote(s: &str, m: &RawMatch) -> Option<ElementDetail> {
    Some(ElementDetail::FootnoteRef {
        id: m.part(s, 0)?.to_string(),
    })
}
