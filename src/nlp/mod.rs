pub mod terms;

pub use terms::{top_terms, TermFrequency};
