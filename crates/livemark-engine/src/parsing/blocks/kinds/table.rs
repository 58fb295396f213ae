use crate::parsing::{inline::cursor::is_escaped, rope::span::Span};

/// A pipe-table row. Offsets are local to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLine {
    /// Cells left to right.
    pub cells: Vec<Cell>,
    /// `|---|:--:|` separator row.
    pub delimiter: bool,
}

/// One cell: the pipe that opens it and its trimmed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub pipe: usize,
    pub text: Span,
}

impl Cell {
    /// From the opening pipe to the end of the content.
    pub fn span(&self) -> Span {
        Span::new(self.pipe, self.text.end)
    }
}

pub struct Table;

impl Table {
    pub const PIPE: u8 = b'|';

    /// A row starts with `|` (after optional indent) and has at least one
    /// more unescaped pipe.
    pub fn parse(line: &str) -> Option<TableLine> {
        let indent = line.len() - line.trim_start().len();
        let end = line.trim_end().len();
        if line.as_bytes().get(indent) != Some(&Self::PIPE) {
            return None;
        }

        let pipes: Vec<usize> = (indent..end)
            .filter(|&i| line.as_bytes()[i] == Self::PIPE && !is_escaped(line, i))
            .collect();
        if pipes.len() < 2 {
            return None;
        }

        let mut cells: Vec<Cell> = pipes
            .windows(2)
            .map(|w| Cell {
                pipe: w[0],
                text: trimmed(line, w[0] + 1, w[1]),
            })
            .collect();
        // `| a | b` without a closing pipe still has a last cell
        if let Some(&last) = pipes.last() {
            if last + 1 < end {
                cells.push(Cell {
                    pipe: last,
                    text: trimmed(line, last + 1, end),
                });
            }
        }

        let delimiter = !cells.is_empty()
            && cells
                .iter()
                .all(|c| is_delimiter_cell(&line[c.text.start..c.text.end]));
        Some(TableLine { cells, delimiter })
    }
}

fn trimmed(line: &str, start: usize, end: usize) -> Span {
    let s = &line[start..end];
    let lead = s.len() - s.trim_start().len();
    let trail = s.len() - s.trim_end().len();
    Span::new(start + lead, (end - trail).max(start + lead))
}

/// `---`, `:--`, `--:` or `:-:`.
fn is_delimiter_cell(cell: &str) -> bool {
    let inner = cell.strip_prefix(':').unwrap_or(cell);
    let inner = inner.strip_suffix(':').unwrap_or(inner);
    !inner.is_empty() && inner.bytes().all(|b| b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(line: &str) -> Vec<&str> {
        Table::parse(line)
            .unwrap()
            .cells
            .iter()
            .map(|c| &line[c.text.start..c.text.end])
            .collect()
    }

    #[test]
    fn row_cells_are_trimmed() {
        assert_eq!(cells("| a | **b** |"), vec!["a", "**b**"]);
        assert!(!Table::parse("| a | b |").unwrap().delimiter);
    }

    #[test]
    fn open_ended_row() {
        assert_eq!(cells("| a | b"), vec!["a", "b"]);
    }

    #[test]
    fn delimiter_row() {
        assert!(Table::parse("|---|:--:|--:|").unwrap().delimiter);
        assert!(!Table::parse("|---|x|").unwrap().delimiter);
    }

    #[test]
    fn escaped_pipe_stays_in_cell() {
        assert_eq!(cells(r"| a \| b | c |"), vec![r"a \| b", "c"]);
    }

    #[test]
    fn cells_open_at_their_pipe() {
        let row = Table::parse("| a | bc |").unwrap();
        let spans: Vec<(usize, usize)> = row.cells.iter().map(|c| (c.span().start, c.span().end)).collect();
        assert_eq!(spans, vec![(0, 3), (4, 8)]);
    }

    #[test]
    fn not_a_row() {
        assert_eq!(Table::parse("a | b"), None);
        assert_eq!(Table::parse("|"), None);
    }
}
