use super::rule::HorizontalRule;
use crate::parsing::{element::ListMarker, rope::span::Span};

/// A list item marker recognized at the start of a line. Spans are local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub marker: ListMarker,
    /// 1-based nesting depth from indentation.
    pub level: u8,
    /// `Some(checked)` when a `[ ]` / `[x]` task box follows the marker.
    pub task: Option<bool>,
    /// Marker plus task box.
    pub marker_span: Span,
    pub body: Span,
}

pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];
    pub const ORDERED_DELIMS: [u8; 2] = [b'.', b')'];
    pub const MAX_DIGITS: usize = 9;
    pub const INDENT_PER_LEVEL: usize = 2;
    pub const TAB_WIDTH: usize = 4;

    pub fn parse(line: &str) -> Option<ListLine> {
        if HorizontalRule::matches(line) {
            return None;
        }
        let b = line.as_bytes();
        let indent = b.iter().take_while(|&&c| c == b' ' || c == b'\t').count();
        let columns: usize = b[..indent]
            .iter()
            .map(|&c| if c == b'\t' { Self::TAB_WIDTH } else { 1 })
            .sum();

        let (marker, marker_end) = Self::marker(line, indent)?;
        if !matches!(b.get(marker_end), None | Some(b' ') | Some(b'\t')) {
            return None;
        }

        let mut end = marker_end;
        let mut body_start = skip_blanks(b, marker_end);
        let mut task = None;
        if let Some(state) = task_box(&b[body_start..]) {
            let box_end = body_start + 3;
            if matches!(b.get(box_end), None | Some(b' ') | Some(b'\t')) {
                task = Some(state);
                end = box_end;
                body_start = skip_blanks(b, box_end);
            }
        }

        let level = (columns / Self::INDENT_PER_LEVEL + 1).min(u8::MAX as usize) as u8;
        Some(ListLine {
            marker,
            level,
            task,
            marker_span: Span::new(indent, end),
            body: Span::new(body_start, line.trim_end().len().max(body_start)),
        })
    }

    fn marker(line: &str, at: usize) -> Option<(ListMarker, usize)> {
        let b = line.as_bytes();
        let first = *b.get(at)?;
        if Self::BULLETS.contains(&first) {
            return Some((ListMarker::Bullet(first as char), at + 1));
        }
        let digits = b[at..].iter().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || digits > Self::MAX_DIGITS {
            return None;
        }
        let delim = *b.get(at + digits)?;
        if !Self::ORDERED_DELIMS.contains(&delim) {
            return None;
        }
        let n = line[at..at + digits].parse().ok()?;
        Some((ListMarker::Ordered(n), at + digits + 1))
    }
}

fn skip_blanks(b: &[u8], mut i: usize) -> usize {
    while matches!(b.get(i), Some(b' ') | Some(b'\t')) {
        i += 1;
    }
    i
}

fn task_box(b: &[u8]) -> Option<bool> {
    match b {
        [b'[', b' ', b']', ..] => Some(false),
        [b'[', b'x' | b'X', b']', ..] => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bullet_item() {
        let l = ListItem::parse("- item").unwrap();
        assert_eq!(l.marker, ListMarker::Bullet('-'));
        assert_eq!(l.level, 1);
        assert_eq!(l.marker_span, Span::new(0, 1));
        assert_eq!(l.body, Span::new(2, 6));
        assert_eq!(l.task, None);
    }

    #[test]
    fn nested_ordered_item() {
        let l = ListItem::parse("    12) twelve").unwrap();
        assert_eq!(l.marker, ListMarker::Ordered(12));
        assert_eq!(l.level, 3);
        assert_eq!(l.marker_span, Span::new(4, 7));
    }

    #[test]
    fn task_items() {
        let open = ListItem::parse("- [ ] todo").unwrap();
        assert_eq!(open.task, Some(false));
        assert_eq!(open.marker_span, Span::new(0, 5));
        assert_eq!(open.body, Span::new(6, 10));

        let done = ListItem::parse("* [x] done").unwrap();
        assert_eq!(done.task, Some(true));
    }

    #[test]
    fn link_after_marker_is_not_a_task() {
        let l = ListItem::parse("- [x](url)").unwrap();
        assert_eq!(l.task, None);
        assert_eq!(l.body, Span::new(2, 10));
    }

    #[test]
    fn empty_item() {
        let l = ListItem::parse("-").unwrap();
        assert!(l.body.is_empty());
    }

    #[test]
    fn not_list_items() {
        assert_eq!(ListItem::parse("*emphasis*"), None);
        assert_eq!(ListItem::parse("- - -"), None);
        assert_eq!(ListItem::parse("1.5 litres"), None);
        assert_eq!(ListItem::parse("plain"), None);
        assert_eq!(ListItem::parse("1234567890. too long"), None);
    }
}
