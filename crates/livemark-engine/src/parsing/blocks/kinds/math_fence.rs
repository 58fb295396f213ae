use crate::parsing::rope::span::Span;

/// What a `$$` line means on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathLine {
    /// `$$ x $$` on one line; local span of the text between delimiters.
    Complete(Span),
    /// `$$` opening a multi-line formula; local span of any text after it.
    Open(Span),
}

pub struct MathFence;

impl MathFence {
    pub const DELIM: &'static str = "$$";

    pub fn classify(line: &str) -> Option<MathLine> {
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        if !rest.starts_with(Self::DELIM) {
            return None;
        }
        let body_start = indent + Self::DELIM.len();
        let body = line[body_start..].trim_end();
        if body.ends_with(Self::DELIM) {
            let body_end = body_start + body.len() - Self::DELIM.len();
            return Some(MathLine::Complete(Span::new(body_start, body_end)));
        }
        Some(MathLine::Open(Span::new(body_start, line.len())))
    }

    /// Local span of the formula text before a closing `$$`, if `line`
    /// closes an open formula.
    pub fn close(line: &str) -> Option<Span> {
        let trimmed = line.trim_end();
        trimmed
            .ends_with(Self::DELIM)
            .then(|| Span::new(0, trimmed.len() - Self::DELIM.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_formula() {
        assert_eq!(
            MathFence::classify("$$ x^2 $$"),
            Some(MathLine::Complete(Span::new(2, 7)))
        );
    }

    #[test]
    fn opener_with_and_without_trailing_text() {
        assert_eq!(MathFence::classify("$$"), Some(MathLine::Open(Span::new(2, 2))));
        assert_eq!(
            MathFence::classify("$$ a +"),
            Some(MathLine::Open(Span::new(2, 6)))
        );
    }

    #[test]
    fn empty_pair_is_complete_and_empty() {
        assert_eq!(
            MathFence::classify("$$$$"),
            Some(MathLine::Complete(Span::new(2, 2)))
        );
    }

    #[test]
    fn not_math() {
        assert_eq!(MathFence::classify("costs $5"), None);
        assert_eq!(MathFence::classify("a $$ b"), None);
    }

    #[test]
    fn closer() {
        assert_eq!(MathFence::close("b $$  "), Some(Span::new(0, 2)));
        assert_eq!(MathFence::close("$$"), Some(Span::new(0, 0)));
        assert_eq!(MathFence::close("b"), None);
    }
}
