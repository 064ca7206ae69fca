use std::collections::BTreeSet;

use crate::index::InvertedIndex;

/// Documents containing every whitespace-separated term of `query`.
///
/// Terms are normalized like indexed tokens. A term missing from the index
/// empties the result, as does a query with no terms.
pub fn boolean_and(index: &InvertedIndex, query: &str) -> BTreeSet<String> {
    let mut result: Option<BTreeSet<String>> = None;
    for word in query.split_whitespace() {
        let term = index.normalize(word);
        let postings = index.postings(&term);
        if postings.is_empty() {
            tracing::debug!(%term, "term not indexed");
            return BTreeSet::new();
        }
        result = Some(match result {
            None => postings.keys().cloned().collect(),
            Some(acc) => acc.into_iter().filter(|doc| postings.contains_key(doc)).collect(),
        });
    }
    let result = result.unwrap_or_default();
    tracing::debug!(query, hits = result.len(), "boolean query");
    result
}
