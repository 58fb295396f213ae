//! Live-preview core for markdown: a line parser with a priority-based
//! conflict resolver, a bounded line cache and cursor-driven reveal.

pub mod cache;
pub mod io;
pub mod parsing;
pub mod preview;
pub mod reveal;

// Re-export key types for easier usage
pub use cache::{CacheError, CacheStats, LineCache, LineKey};
pub use io::{IoError, read_document};
pub use parsing::{
    ParseRange,
    element::{Decoration, ElementDetail, ElementKey, ElementType, ParsedElement},
    parse_document, parse_line, parse_with_regions,
    rope::span::Span,
};
pub use preview::{LivePreview, PreviewOptions};
pub use reveal::{RevealContext, RevealGranularity, RevealSource, SelectionRange};
