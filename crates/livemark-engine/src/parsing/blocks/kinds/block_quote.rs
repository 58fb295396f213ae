use crate::parsing::{cached_regex, rope::span::Span};

/// Blockquote prefixes and the callout refinement `> [!kind]± title`.
pub struct BlockQuote;

/// A callout tag found at the start of a blockquote body. Spans are local
/// to the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutTag {
    /// Lowercased kind (`note`, `warning`, ...).
    pub kind: String,
    /// `Some(true)` for `-`, `Some(false)` for `+`.
    pub folded: Option<bool>,
    /// End of the tag and fold marker, trailing whitespace included.
    pub tag_end: usize,
    pub title: Span,
}

cached_regex!(callout_re, r"^\[!([A-Za-z][\w-]*)\]([+-])?[ \t]*");

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Handles `> text`, `>> nested` and `> > spaced nested`.
    pub fn strip_prefixes(s: &str) -> (u8, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0u8;

        loop {
            let mut j = i;
            while j < b.len() && b[j] == b' ' {
                j += 1;
            }
            if j < b.len() && b[j] == (Self::PREFIX as u8) {
                depth = depth.saturating_add(1);
                i = j + 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
        }
        (depth, i)
    }

    pub fn callout(body: &str) -> Option<CalloutTag> {
        let caps = callout_re().captures(body)?;
        let whole = caps.get(0)?;
        let folded = caps.get(2).map(|m| m.as_str() == "-");
        Some(CalloutTag {
            kind: caps.get(1)?.as_str().to_ascii_lowercase(),
            folded,
            tag_end: whole.end(),
            title: Span::new(whole.end(), body.trim_end().len().max(whole.end())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefixes("hello"), (0, 0));
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefixes("> hello"), (1, 2));
    }

    #[test]
    fn strip_double_quote() {
        assert_eq!(BlockQuote::strip_prefixes("> > hello"), (2, 4));
    }

    #[test]
    fn strip_nested_quote_no_space() {
        assert_eq!(BlockQuote::strip_prefixes(">> hello"), (2, 3));
    }

    #[test]
    fn trailing_spaces_are_not_consumed_without_a_prefix() {
        assert_eq!(BlockQuote::strip_prefixes(">   text"), (1, 2));
    }

    #[test]
    fn callout_with_fold_and_title() {
        let body = "[!Warning]- Mind the gap";
        let tag = BlockQuote::callout(body).unwrap();
        assert_eq!(tag.kind, "warning");
        assert_eq!(tag.folded, Some(true));
        assert_eq!(&body[tag.title.start..tag.title.end], "Mind the gap");
    }

    #[test]
    fn callout_without_title() {
        let tag = BlockQuote::callout("[!note]").unwrap();
        assert_eq!(tag.folded, None);
        assert!(tag.title.is_empty());
        assert_eq!(tag.tag_end, 7);
    }

    #[test]
    fn not_a_callout() {
        assert_eq!(BlockQuote::callout("[note] text"), None);
        assert_eq!(BlockQuote::callout("plain"), None);
    }
}
