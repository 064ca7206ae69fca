use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stemmer::stem;

pub type Position = u32;
/// Ascending positions of one term in one document.
pub type Postings = Vec<Position>;
/// Document name → postings.
pub type DocPostings = BTreeMap<String, Postings>;

static NO_POSTINGS: DocPostings = BTreeMap::new();

/// Positional inverted index: term → document → positions.
///
/// Built once, then read-only. Both map levels are ordered so that snapshots
/// and reports are reproducible; nothing else depends on that order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    stemming: bool,
    terms: BTreeMap<String, DocPostings>,
}

impl InvertedIndex {
    pub fn new(stemming: bool) -> Self {
        Self { stemming, terms: BTreeMap::new() }
    }

    pub fn stemming(&self) -> bool {
        self.stemming
    }

    /// Lowercase, then stem if this index was built with stemming.
    pub fn normalize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if self.stemming {
            stem(&lower)
        } else {
            lower
        }
    }

    /// Record `term` at `position` in `document`. Positions must arrive in ascending order.
    pub(crate) fn add_posting(&mut self, term: String, document: &str, position: Position) {
        let postings = self.terms.entry(term).or_default();
        match postings.get_mut(document) {
            Some(list) => list.push(position),
            None => {
                postings.insert(document.to_string(), vec![position]);
            }
        }
    }

    /// Postings for an already-normalized term.
    pub fn postings(&self, term: &str) -> &DocPostings {
        self.terms.get(term).unwrap_or(&NO_POSTINGS)
    }

    /// Postings for a word, normalized the same way as indexed tokens.
    pub fn lookup_term(&self, word: &str) -> &DocPostings {
        self.postings(&self.normalize(word))
    }

    /// Every term occurring in `document`, with its positions there. Linear in the number of terms.
    pub fn lookup_document(&self, document: &str) -> BTreeMap<&str, &[Position]> {
        let document = document.to_lowercase();
        self.terms
            .iter()
            .filter_map(|(term, docs)| docs.get(&document).map(|p| (term.as_str(), p.as_slice())))
            .collect()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &DocPostings)> {
        self.terms.iter().map(|(t, d)| (t.as_str(), d))
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Distinct documents holding at least one indexed term.
    pub fn num_documents(&self) -> usize {
        let mut docs: Vec<&str> = self.terms.values().flat_map(|d| d.keys().map(String::as_str)).collect();
        docs.sort_unstable();
        docs.dedup();
        docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
