use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 0-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text as a string, including the terminator.
    pub text: String,
}

impl LineRef {
    /// The line text without its `\n` / `\r\n` terminator.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }

    /// Byte span of the line without its terminator.
    pub fn content_span(&self) -> Span {
        Span {
            start: self.span.start,
            end: self.span.start + self.content().len(),
        }
    }
}

/// Returns an iterator over lines with their numbers and byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which is important for
/// accurate span tracking.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(number, line)| {
        let start = offset;
        let len = line.len();
        offset += len;
        LineRef {
            number,
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}

/// Number of lines as the editor sees them: a trailing newline opens one
/// more (empty) line, and an empty document has a single empty line.
pub fn line_count(rope: &Rope) -> usize {
    rope.line_of_offset(rope.len()) + 1
}

/// Number of lines [`lines_with_spans`] yields: a trailing newline opens
/// no stored line and an empty document has none.
pub fn stored_line_count(rope: &Rope) -> usize {
    let breaks = line_count(rope) - 1;
    if rope.offset_of_line(breaks) == rope.len() {
        breaks
    } else {
        breaks + 1
    }
}

/// Reads line `number` alone. `number` must be below
/// [`stored_line_count`].
pub fn line_ref(rope: &Rope, number: usize) -> LineRef {
    let start = rope.offset_of_line(number);
    let end = rope.offset_of_line(number + 1).max(start);
    LineRef {
        number,
        span: Span { start, end },
        text: rope.slice_to_cow(start..end).into_owned(),
    }
}

/// 0-based line containing `offset`, clamped to the document.
pub fn line_of_offset(rope: &Rope, offset: usize) -> usize {
    rope.line_of_offset(offset.min(rope.len()))
}
