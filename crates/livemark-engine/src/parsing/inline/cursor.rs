/// Byte-wise scanning position over one line's text.
///
/// Matchers work in line-local offsets; the driver shifts results to
/// absolute positions. Cloning a cursor is how matchers probe ahead
/// without committing.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    /// Local byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        byte_at(self.s, self.i)
    }

    /// The unread bytes. Empty once past the end.
    fn rest(&self) -> &'a [u8] {
        self.s.as_bytes().get(self.i..).unwrap_or(&[])
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes. May move past the end; `eof` then holds.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Length of the run of `b` starting here.
    pub fn run_len(&self, b: u8) -> usize {
        self.rest().iter().take_while(|&&c| c == b).count()
    }

    /// True if the byte here is backslash-escaped.
    pub fn escaped(&self) -> bool {
        is_escaped(self.s, self.i)
    }
}

/// True if the byte at `idx` is preceded by an odd number of consecutive
/// backslashes.
pub fn is_escaped(s: &str, idx: usize) -> bool {
    let b = s.as_bytes();
    let end = idx.min(b.len());
    let run = b[..end].iter().rev().take_while(|&&c| c == b'\\').count();
    run % 2 == 1
}

/// Byte immediately before `idx`, if any.
pub fn byte_before(s: &str, idx: usize) -> Option<u8> {
    idx.checked_sub(1).and_then(|i| s.as_bytes().get(i).copied())
}

/// Byte at `idx`, if any.
pub fn byte_at(s: &str, idx: usize) -> Option<u8> {
    s.as_bytes().get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_a_wikilink_opener() {
        let mut cur = Cursor::new("[[a]]");
        assert!(cur.starts_with(b"[["));
        cur.bump_n(2);
        assert_eq!(cur.peek(), Some(b'a'));
        assert_eq!(cur.bump(), Some(b'a'));
        assert!(cur.starts_with(b"]]"));
    }

    #[test]
    fn empty_line() {
        let mut cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.bump(), None);
        assert!(cur.starts_with(b""));
    }

    #[test]
    fn past_the_end_is_safe() {
        let mut cur = Cursor::new("ab");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert!(!cur.starts_with(b"a"));
        assert_eq!(cur.run_len(b'a'), 0);
    }

    #[test]
    fn probe_does_not_move_the_original() {
        let cur = Cursor::new("`x`");
        let mut probe = cur.clone();
        probe.bump_n(2);
        assert_eq!(cur.i, 0);
        assert_eq!(probe.peek(), Some(b'`'));
    }

    #[test]
    fn run_len_counts_repeated_bytes() {
        let mut cur = Cursor::new("``code``");
        assert_eq!(cur.run_len(b'`'), 2);
        cur.bump_n(2);
        assert_eq!(cur.run_len(b'`'), 0);
    }

    #[test]
    fn escape_needs_odd_backslash_run() {
        assert!(!is_escaped("*a*", 0));
        assert!(is_escaped("\\*a*", 1));
        assert!(!is_escaped("\\\\*a*", 2));
        assert!(is_escaped("\\\\\\*a*", 3));
        assert!(cursor_escaped("\\`x`", 1));
    }

    fn cursor_escaped(s: &str, at: usize) -> bool {
        let mut cur = Cursor::new(s);
        cur.bump_n(at);
        cur.escaped()
    }

    #[test]
    fn neighbour_bytes() {
        assert_eq!(byte_before("ab", 0), None);
        assert_eq!(byte_before("ab", 1), Some(b'a'));
        assert_eq!(byte_at("ab", 1), Some(b'b'));
        assert_eq!(byte_at("ab", 2), None);
    }
}
