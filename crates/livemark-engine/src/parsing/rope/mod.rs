pub mod lines;
pub mod span;

pub use lines::{LineRef, line_count, line_of_offset, line_ref, lines_with_spans, stored_line_count};
pub use span::Span;
