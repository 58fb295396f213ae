//! # Inline Parsing
//!
//! Table-driven inline scanning over the text a block rule leaves behind.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and runs on one line's
//! remaining text at a time. Each of the sixteen families owns its
//! delimiters (`kinds`) and is registered in an ordered rule table
//! (`rules`). The driver (`parser`) scans every family exhaustively and
//! returns overlapping, unresolved candidates with absolute spans.
//!
//! ## Modules
//!
//! - **`types`**: `RawMatch` (local spans) and `InlineFamily`
//! - **`kinds`**: per-family matchers with owned delimiters
//! - **`rules`**: the `{matcher, builder}` table
//! - **`cursor`**: `Cursor` for byte-wise scanning plus escape helpers
//! - **`parser`**: `parse_inline()` entry point
//!
//! ## Raw Zones
//!
//! Code spans and inline formulas are raw zones. The scanner does not
//! suppress matches inside them; the conflict resolver drops anything
//! nested inside a raw zone.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod rules;
pub mod types;

pub use parser::parse_inline;
pub use types::{InlineFamily, RawMatch};
