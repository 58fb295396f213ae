use std::fmt::Write;

use xi_rope::Rope;

use crate::parsing::{
    element::{Decoration, ParsedElement},
    rope::span::Span,
};

const SOURCE_PREVIEW: usize = 40;

/// Renders elements as stable text for snapshot tests, one per line:
///
/// ```text
/// L0 Heading Replace 0..7 level=1 content="Hello" src="# Hello"
/// ```
///
/// Children follow their parent, indented by two spaces.
pub fn normalize(rope: &Rope, elements: &[ParsedElement]) -> String {
    let mut out = String::new();
    for el in elements {
        render(&mut out, rope, el, "");
        for child in &el.children {
            render(&mut out, rope, child, "  ");
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn render(out: &mut String, rope: &Rope, el: &ParsedElement, indent: &str) {
    let decoration = match el.decoration {
        Decoration::LineStyle => "LineStyle",
        Decoration::Replace => "Replace",
    };
    let _ = write!(
        out,
        "{indent}L{} {:?} {decoration} {}..{}",
        el.line_number, el.kind, el.from, el.to
    );
    if let Some(level) = el.level {
        let _ = write!(out, " level={level}");
    }
    if let Some(lang) = &el.language {
        let _ = write!(out, " lang={lang}");
    }
    if let Some(content) = &el.content {
        let _ = write!(out, " content={content:?}");
    }
    if !el.span().is_empty() {
        let _ = write!(out, " src={:?}", source_preview(rope, el.span()));
    }
    out.push('\n');
}

/// The span's source text, cut to [`SOURCE_PREVIEW`] bytes on a char
/// boundary with a `...` suffix.
fn source_preview(rope: &Rope, sp: Span) -> String {
    let mut s = rope.slice_to_cow(sp.start..sp.end).into_owned();
    if s.len() > SOURCE_PREVIEW {
        let mut cut = SOURCE_PREVIEW;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
