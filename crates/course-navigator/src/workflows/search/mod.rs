//! Full-text relevance search over course titles and descriptions.

mod index;
mod tokenizer;

pub use index::{SearchHit, SearchIndex, B, K1};
pub use tokenizer::tokenize;
