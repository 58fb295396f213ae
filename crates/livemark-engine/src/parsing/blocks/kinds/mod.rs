//! Line-level block syntax. Each kind owns its delimiters and returns
//! local spans; the rule table turns them into elements.

pub mod block_quote;
pub mod code_fence;
pub mod details;
pub mod heading;
pub mod list_item;
pub mod math_fence;
pub mod rule;
pub mod table;

pub use block_quote::{BlockQuote, CalloutTag};
pub use code_fence::{CodeFence, FenceOpen};
pub use details::{Details, DetailsLine};
pub use heading::{Heading, HeadingLine};
pub use list_item::{ListItem, ListLine};
pub use math_fence::{MathFence, MathLine};
pub use rule::HorizontalRule;
pub use table::{Table, TableLine};
