// Shared document generators for the benches.
// Each bench file compiles this module separately and uses only part of it.
#![allow(dead_code)]

/// One screenful of mixed live-preview syntax: every block kind and most
/// inline families, plus a fenced code block and a block formula.
const SCREEN: &str = "\
# Title

## Section with *emphasis*

Paragraph with **bold**, *italic*, `code` and a [[wiki link|alias]].
- Bullet point with [a link](https://example.com \"home\")
  - [ ] Nested task with $x^2$
1. Ordered item with ~~strike~~ and ==mark==

> [!tip] Callout title
> quoted text with <kbd>Ctrl</kbd> and H~2~O
---
| a | b |
|---|---|
| `1` | **2** |

```rust
fn example() {
    println!(\"Hello\");
}
```

$$
\\sum_{i=0}^{n} i
$$
Footnote ref[^1] and ![an image](pic.png).
";

/// `screens` copies of the mixed screen.
pub fn generate_markdown_content(screens: usize) -> String {
    SCREEN.repeat(screens)
}

/// A document of `lines` lines with unique text on every line, so the
/// line cache cannot share entries between repeats.
pub fn generate_unique_lines(lines: usize) -> String {
    let screen: Vec<&str> = SCREEN.lines().collect();
    let mut out = String::new();
    for i in 0..lines {
        let line = screen[i % screen.len()];
        if line.is_empty() || line.starts_with("```") || line.starts_with("$$") {
            out.push_str(line);
        } else {
            out.push_str(&format!("{line} #{i}"));
        }
        out.push('\n');
    }
    out
}

pub fn generate_large_document() -> String {
    generate_unique_lines(5_000)
}
