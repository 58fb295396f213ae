//! # Block Parsing
//!
//! Two levels of block recognition:
//!
//! 1. **Line rules** (`rules`): an ordered table of matchers decides at most
//!    one primary construct per line (fence, formula, heading, blockquote or
//!    callout, list item, rule, table row, details tag) and what is left for
//!    inline parsing.
//! 2. **Regions** (`regions`): a document-level pass groups fenced code and
//!    `$$` formulas spanning several lines into single block elements.
//!
//! ## Modules
//!
//! - **`kinds`**: per-construct recognizers with owned delimiters
//! - **`rules`**: `BLOCK_RULES` and `parse_block()`
//! - **`regions`**: `RegionMap`, `scan_regions()` and `Region`
//!
//! ## Key Invariants
//!
//! - Region lines are raw zones: no block or inline parsing inside
//! - All elements store absolute byte spans into the rope

pub mod kinds;
pub mod regions;
pub mod rules;

pub use regions::{Region, RegionKind, RegionMap, scan_regions};
pub use rules::{BLOCK_RULES, BlockOutcome, BlockRule, LineInput, parse_block};
