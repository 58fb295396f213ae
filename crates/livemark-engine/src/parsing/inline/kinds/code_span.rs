use crate::parsing::{inline::cursor::Cursor, inline::types::RawMatch, rope::span::Span};

/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones": no other element may live inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds every code span in `s`.
    ///
    /// An opening run of N backticks closes at the next run of exactly N
    /// backticks. A single leading and trailing space are stripped from the
    /// content when both are present and the content is not all spaces.
    /// An unclosed run is literal text.
    pub fn find(s: &str) -> Vec<RawMatch> {
        let mut cur = Cursor::new(s);
        let mut out = vec![];

        while !cur.eof() {
            if cur.peek() != Some(Self::TICK) {
                cur.bump();
                continue;
            }
            let open_len = cur.run_len(Self::TICK);
            if cur.escaped() {
                // the escaped tick is literal; the rest of the run may still open
                cur.bump();
                continue;
            }
            match Self::try_close(&cur, open_len) {
                Some(m) => {
                    cur.bump_n(m.span.len());
                    out.push(m);
                }
                None => cur.bump_n(open_len),
            }
        }
        out
    }

    fn try_close(open: &Cursor<'_>, open_len: usize) -> Option<RawMatch> {
        let start = open.i;
        let mut cur = open.clone();
        cur.bump_n(open_len);
        let inner_start = cur.i;

        while !cur.eof() {
            if cur.peek() == Some(Self::TICK) {
                let run = cur.run_len(Self::TICK);
                if run == open_len {
                    let inner_end = cur.i;
                    cur.bump_n(run);
                    return Some(RawMatch {
                        span: Span::new(start, cur.i),
                        content: Self::strip_padding(open.s, inner_start, inner_end),
                        parts: vec![],
                    });
                }
                cur.bump_n(run);
            } else {
                cur.bump();
            }
        }
        None
    }

    fn strip_padding(s: &str, start: usize, end: usize) -> Span {
        let inner = &s[start..end];
        if inner.len() >= 2
            && inner.starts_with(' ')
            && inner.ends_with(' ')
            && !inner.bytes().all(|b| b == b' ')
        {
            Span::new(start + 1, end - 1)
        } else {
            Span::new(start, end)
        }
    }
}
