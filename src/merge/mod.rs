//! Merge primitives used when folding deltas
//!
//! - [`merge_content`] - text and content-block merging
//! - [`merge_dicts`] - open JSON maps (`additional_data`, `response_metadata`)
//! - [`merge_lists`] - ordered lists of index-keyed fragments
//!
//! Every primitive takes its operands by reference and returns a new value.
//! The `*_into` forms append to an owned target instead, for running folds.

mod content;
mod dicts;
mod lists;

pub use content::{merge_content, merge_content_into};
pub use dicts::{merge_all_dicts, merge_dicts, merge_dicts_into};
pub use lists::{IndexedFragment, merge_lists, merge_lists_into};

/// How two JSON strings under the same key are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringMerge {
    /// The right-hand string replaces the left-hand one
    Overwrite,
    /// The right-hand string is appended (streamed text)
    Concat,
}
