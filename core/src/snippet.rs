//! Context windows around indexed term occurrences.
//!
//! Raw tokens are re-derived from the document source on demand instead of
//! being kept in memory for every document.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::corpus::DocumentSource;
use crate::index::{InvertedIndex, Position};
use crate::tokenizer::raw_tokens;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowToken {
    pub position: Position,
    pub text: String,
}

/// The raw tokens around one match, original case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub position: Position,
    pub window: Vec<WindowToken>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SnippetSet {
    /// Document → snippets in ascending match position.
    pub documents: BTreeMap<String, Vec<Snippet>>,
    /// Documents listed in the postings whose text could not be read.
    pub missing: Vec<String>,
}

/// Window over `tokens` for a 1-based match `position` and `radius`.
///
/// Spans 0-based indices `max(0, p - r - 1) ..= min(len - 1, p + r - 1)`.
pub fn window(tokens: &[String], position: Position, radius: usize) -> Vec<WindowToken> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let p = position as usize;
    let start = p.saturating_sub(radius).saturating_sub(1);
    let end = (tokens.len() - 1).min(p.saturating_add(radius).saturating_sub(1));
    if start > end {
        return Vec::new();
    }
    (start..=end)
        .map(|i| WindowToken { position: (i + 1) as Position, text: tokens[i].clone() })
        .collect()
}

/// Snippets for every occurrence of an already-normalized `term`.
///
/// Documents the source cannot provide are skipped and listed in `missing`.
pub fn extract<S: DocumentSource + ?Sized>(
    index: &InvertedIndex,
    term: &str,
    radius: usize,
    source: &S,
) -> Result<SnippetSet> {
    let mut set = SnippetSet::default();
    for (document, positions) in index.postings(term) {
        let text = match source.read(document) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!(%document, "document not found, skipping snippets");
                set.missing.push(document.clone());
                continue;
            }
            Err(e) => {
                tracing::warn!(%document, error = %e, "document unreadable, skipping snippets");
                set.missing.push(document.clone());
                continue;
            }
        };
        let tokens = raw_tokens(&text);
        let snippets = positions
            .iter()
            .map(|&position| Snippet { position, window: window(&tokens, position, radius) })
            .collect();
        set.documents.insert(document.clone(), snippets);
    }
    Ok(set)
}
