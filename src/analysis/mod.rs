//! Pure text analysis applied to every extracted article.
//!
//! - [`summarize`]: extractive summary, a prefix of whole sentences within a word budget
//! - [`categorize`]: first-match keyword categorization over a fixed, ordered table
//!
//! Neither stage performs I/O; both are deterministic for a given input.

pub mod categorize;
pub mod summarize;

pub use categorize::categorize;
pub use summarize::summarize;
