/// Thematic break: three or more of the same `-`, `*` or `_`, spaces
/// allowed between them.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const CHARS: [u8; 3] = [b'-', b'*', b'_'];
    pub const MIN_RUN: usize = 3;

    pub fn matches(line: &str) -> bool {
        let t = line.trim();
        let Some(&first) = t.as_bytes().first() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 0;
        for b in t.bytes() {
            match b {
                b' ' | b'\t' => {}
                b if b == first => count += 1,
                _ => return false,
            }
        }
        count >= Self::MIN_RUN && line.len() - line.trim_start().len() <= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("---", true)]
    #[case("***", true)]
    #[case("___", true)]
    #[case("- - -", true)]
    #[case(" * * * * ", true)]
    #[case("--", false)]
    #[case("-*-", false)]
    #[case("--- text", false)]
    #[case("", false)]
    fn rules(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(HorizontalRule::matches(line), expected);
    }
}
