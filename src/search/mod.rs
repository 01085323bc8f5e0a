//! Full-text search over tab entries
//!
//! Provides the tokenizer shared by indexing, free-text filtering and result
//! sorting, and the prefix-matching inverted index each tab builds over its
//! search fields.

pub mod index;
pub mod tokenizer;

pub use index::SearchIndex;
pub use tokenizer::{collate, fold, normalize, tokenize};
