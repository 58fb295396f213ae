//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: renders an element list as stable text, one element
//!   per line, for `insta` snapshots
//! - **`invariants`**: runtime checks for parser correctness (spans in
//!   bounds, no partial overlaps, nothing inside a raw zone)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::normalize;
