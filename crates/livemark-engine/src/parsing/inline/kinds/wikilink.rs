use crate::parsing::{
    inline::{
        cursor::{Cursor, byte_before},
        types::RawMatch,
    },
    rope::span::Span,
};

/// Wiki-style links `[[target#heading|alias]]` and embeds `![[target]]`.
///
/// `parts` layout: `[target, heading, alias]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
    pub const HEADING: u8 = b'#';
    pub const EMBED: u8 = b'!';

    /// Finds `[[…]]` links that are not embeds.
    pub fn find_links(s: &str) -> Vec<RawMatch> {
        Self::find(s, false)
    }

    /// Finds `![[…]]` embeds.
    pub fn find_embeds(s: &str) -> Vec<RawMatch> {
        Self::find(s, true)
    }

    fn find(s: &str, embed: bool) -> Vec<RawMatch> {
        let mut cur = Cursor::new(s);
        let mut out = vec![];
        while !cur.eof() {
            let at_open = if embed {
                cur.peek() == Some(Self::EMBED) && s.as_bytes()[cur.i + 1..].starts_with(Self::OPEN)
            } else {
                cur.starts_with(Self::OPEN) && byte_before(s, cur.i) != Some(Self::EMBED)
            };
            if at_open && !cur.escaped() {
                let mut probe = cur.clone();
                if embed {
                    probe.bump();
                }
                if let Some(m) = Self::try_parse(&mut probe, cur.i) {
                    cur = probe;
                    out.push(m);
                    continue;
                }
            }
            cur.bump();
        }
        out
    }

    /// Parses from `[[` at the cursor. On failure the caller's cursor is
    /// untouched (the probe is a clone).
    fn try_parse(cur: &mut Cursor<'_>, start: usize) -> Option<RawMatch> {
        cur.bump_n(Self::OPEN.len());
        let target_start = cur.i;

        while !cur.eof() {
            if matches!(cur.peek(), Some(Self::ALIAS) | Some(Self::HEADING))
                || cur.starts_with(Self::CLOSE)
                || cur.starts_with(Self::OPEN)
            {
                break;
            }
            cur.bump();
        }
        let target = Span::new(target_start, cur.i);

        let mut heading = None;
        if cur.peek() == Some(Self::HEADING) {
            cur.bump();
            let heading_start = cur.i;
            while !cur.eof() && cur.peek() != Some(Self::ALIAS) && !cur.starts_with(Self::CLOSE) {
                cur.bump();
            }
            heading = Some(Span::new(heading_start, cur.i));
        }

        let mut alias = None;
        if cur.peek() == Some(Self::ALIAS) {
            cur.bump();
            let alias_start = cur.i;
            while !cur.eof() && !cur.starts_with(Self::CLOSE) {
                cur.bump();
            }
            alias = Some(Span::new(alias_start, cur.i));
        }

        if !cur.starts_with(Self::CLOSE) {
            return None;
        }
        let inner = Span::new(target_start, cur.i);
        cur.bump_n(Self::CLOSE.len());

        if cur.s[target.start..target.end].trim().is_empty() && heading.is_none() {
            return None;
        }

        let content = match alias {
            Some(a) if !a.is_empty() => a,
            _ => inner,
        };
        Some(RawMatch {
            span: Span::new(start, cur.i),
            content,
            parts: vec![Some(target), heading, alias],
        })
    }
}
