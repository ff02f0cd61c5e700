//! The four pipeline stages, in run order.
//!
//! Each stage logs once before and once after its external call(s) and hands
//! its records to the next stage by value.

pub mod compare;
pub mod filter;
pub mod search;
pub mod summarize;

pub use compare::compare_papers;
pub use filter::{filter_papers, parse_selection, SelectionParseError};
pub use search::search_papers;
pub use summarize::summarize_papers;
