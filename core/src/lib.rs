//! Positional inverted index with boolean AND retrieval, a reduced Porter
//! stemmer and snippet extraction over plain-text and HTML corpora.

pub mod builder;
pub mod corpus;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod snippet;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use builder::{build_index, IndexBuilder};
pub use corpus::{CorpusDir, DocumentSource};
pub use error::{Error, Result};
pub use index::{DocPostings, InvertedIndex, Position, Postings};
pub use stopwords::StopwordSet;
