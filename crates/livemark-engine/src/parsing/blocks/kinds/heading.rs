use crate::parsing::rope::span::Span;

/// An ATX heading recognized on one line. Spans are local to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    pub level: u8,
    /// Heading text with the marker and any closing `#` run stripped.
    pub text: Span,
}

pub struct Heading;

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;
    pub const MAX_INDENT: usize = 3;

    /// `#`–`######` followed by a space, tab or end of line.
    pub fn parse(line: &str) -> Option<HeadingLine> {
        let b = line.as_bytes();
        let indent = b.iter().take_while(|&&c| c == b' ').count();
        if indent > Self::MAX_INDENT {
            return None;
        }
        let hashes = b[indent..].iter().take_while(|&&c| c == Self::MARKER).count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }
        let after = indent + hashes;
        if !matches!(b.get(after), None | Some(b' ') | Some(b'\t')) {
            return None;
        }

        let rest = &line[after..];
        let start = after + (rest.len() - rest.trim_start().len());
        let mut end = line.trim_end().len().max(start);

        // closing run: `# Title ##`, only when separated by whitespace
        let body = &line[start..end];
        let closing = body.len() - body.trim_end_matches('#').len();
        if closing > 0 {
            let before = &body[..body.len() - closing];
            if before.is_empty() {
                end = start;
            } else if before.ends_with([' ', '\t']) {
                end = start + before.trim_end().len();
            }
        }

        Some(HeadingLine {
            level: hashes as u8,
            text: Span::new(start, end),
        })
    }
}
