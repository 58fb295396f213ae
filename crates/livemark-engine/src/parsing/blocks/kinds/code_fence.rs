/// An opened code fence: delimiter byte, run length and info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen {
    pub fence: u8,
    pub len: usize,
    pub info: String,
}

impl FenceOpen {
    /// First word of the info string (` ```rust title="x" ` → `rust`).
    pub fn language(&self) -> Option<String> {
        self.info.split_whitespace().next().map(str::to_string)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LEN: usize = 3;
    pub const MAX_INDENT: usize = 3;

    /// Recognizes an opening fence: up to three spaces, then three or more
    /// backticks or tildes, then an optional info string. A backtick
    /// fence's info string may not contain backticks.
    pub fn open(line: &str) -> Option<FenceOpen> {
        let rest = strip_indent(line)?;
        let fence = *rest.as_bytes().first()?;
        if fence != Self::BACKTICK && fence != Self::TILDE {
            return None;
        }
        let len = rest.bytes().take_while(|&b| b == fence).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = rest[len..].trim();
        if fence == Self::BACKTICK && info.contains('`') {
            return None;
        }
        Some(FenceOpen {
            fence,
            len,
            info: info.to_string(),
        })
    }

    /// A closing fence uses the same character, is at least as long as the
    /// opener and carries nothing else.
    pub fn closes(open: &FenceOpen, line: &str) -> bool {
        let Some(rest) = strip_indent(line) else {
            return false;
        };
        let len = rest.bytes().take_while(|&b| b == open.fence).count();
        len >= open.len && rest[len..].trim().is_empty()
    }
}

/// Strips at most three leading spaces; `None` if the line is indented
/// further (an indented code line, not a fence).
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    (indent <= CodeFence::MAX_INDENT).then(|| &line[indent..])
}
