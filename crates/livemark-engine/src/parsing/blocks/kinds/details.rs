use crate::parsing::{cached_regex, element::DetailsTag, rope::span::Span};

/// An HTML disclosure tag alone on a line. `summary` is the local span of
/// the summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsLine {
    pub tag: DetailsTag,
    pub summary: Option<Span>,
}

pub struct Details;

cached_regex!(open_re, r"(?i)^\s*<details(?:\s[^>]*)?>\s*$");
cached_regex!(close_re, r"(?i)^\s*</details>\s*$");
cached_regex!(summary_re, r"(?i)^\s*<summary>(.*?)</summary>\s*$");

impl Details {
    pub fn parse(line: &str) -> Option<DetailsLine> {
        if open_re().is_match(line) {
            return Some(DetailsLine {
                tag: DetailsTag::Open,
                summary: None,
            });
        }
        if close_re().is_match(line) {
            return Some(DetailsLine {
                tag: DetailsTag::Close,
                summary: None,
            });
        }
        let caps = summary_re().captures(line)?;
        let text = caps.get(1)?;
        Some(DetailsLine {
            tag: DetailsTag::Summary,
            summary: Some(Span::new(text.start(), text.end())),
        })
    }
}
