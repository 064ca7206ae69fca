//! Plain-text and JSON renderings of query results and index contents.

use posdex_core::snippet::SnippetSet;
use posdex_core::{InvertedIndex, Position};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Serialize)]
pub struct PostingSummary<'a> {
    pub key: &'a str,
    pub frequency: usize,
    pub positions: &'a [Position],
}

#[derive(Serialize)]
pub struct SearchReport<'a> {
    pub query: &'a str,
    pub results: &'a BTreeSet<String>,
}

fn positions_list(positions: &[Position]) -> String {
    let items: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn word_summaries<'a>(index: &'a InvertedIndex, word: &str) -> Vec<PostingSummary<'a>> {
    index
        .lookup_term(word)
        .iter()
        .map(|(doc, p)| PostingSummary { key: doc, frequency: p.len(), positions: p })
        .collect()
}

pub fn document_summaries<'a>(index: &'a InvertedIndex, document: &str) -> Vec<PostingSummary<'a>> {
    index
        .lookup_document(document)
        .into_iter()
        .map(|(term, p)| PostingSummary { key: term, frequency: p.len(), positions: p })
        .collect()
}

pub fn word_text(word: &str, summaries: &[PostingSummary]) -> String {
    let mut out = String::new();
    if summaries.is_empty() {
        out.push_str(&format!("The word '{word}' does not appear in any document.\n"));
        return out;
    }
    out.push_str(&format!("The word '{word}' appears in {} document(s):\n", summaries.len()));
    for s in summaries {
        out.push_str(&format!("  Document: {} | Frequency: {}\n", s.key, s.frequency));
        out.push_str(&format!("    Positions: {}\n", positions_list(s.positions)));
    }
    out
}

pub fn document_text(document: &str, summaries: &[PostingSummary]) -> String {
    let mut out = String::new();
    if summaries.is_empty() {
        out.push_str(&format!("The document '{document}' does not contain any indexed words.\n"));
        return out;
    }
    out.push_str(&format!("The document '{document}' contains {} word(s):\n", summaries.len()));
    for s in summaries {
        out.push_str(&format!("  Word: {} | Frequency: {}\n", s.key, s.frequency));
        out.push_str(&format!("    Positions: {}\n", positions_list(s.positions)));
    }
    out
}

pub fn search_text(reports: &[SearchReport]) -> String {
    let mut out = String::new();
    for r in reports {
        out.push_str(&format!("Query: {}\n", r.query));
        if r.results.is_empty() {
            out.push_str("Results: No matching documents.\n");
        } else {
            let docs: Vec<&str> = r.results.iter().map(String::as_str).collect();
            out.push_str(&format!("Results: {}\n", docs.join(", ")));
        }
        out.push('\n');
    }
    out
}

pub fn snippets_text(query: &str, per_term: &BTreeMap<String, SnippetSet>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Query: {query}\n"));
    for set in per_term.values() {
        for (doc, snippets) in &set.documents {
            out.push_str(&format!("Document: {doc}\n"));
            for s in snippets {
                let parts: Vec<String> = s.window.iter().map(|t| format!("[Index {}: {}]", t.position, t.text)).collect();
                out.push_str(&format!("  Position {}: {}\n", s.position, parts.join(" ")));
            }
        }
        for doc in &set.missing {
            out.push_str(&format!("Document: {doc} (not found)\n"));
        }
    }
    out
}

pub fn index_text(index: &InvertedIndex) -> String {
    let mut out = String::new();
    for (term, docs) in index.terms() {
        out.push_str(&format!("Word: {term}\n"));
        for (doc, positions) in docs {
            out.push_str(&format!("  Document: {doc} -> {}\n", positions_list(positions)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use posdex_core::{IndexBuilder, StopwordSet};

    fn index() -> InvertedIndex {
        let sw: StopwordSet = ["the", "a"].into_iter().collect();
        let mut b = IndexBuilder::new(&sw, false);
        b.add_document("doc1.txt", "The cat sat on a mat");
        b.add_document("doc2.txt", "cat cat");
        b.finish()
    }

    #[test]
    fn word_report() {
        let idx = index();
        let text = word_text("cat", &word_summaries(&idx, "cat"));
        assert_eq!(
            text,
            "The word 'cat' appears in 2 document(s):\n  Document: doc1.txt | Frequency: 1\n    Positions: [2]\n  Document: doc2.txt | Frequency: 2\n    Positions: [1, 2]\n"
        );
        assert_eq!(word_text("dog", &word_summaries(&idx, "dog")), "The word 'dog' does not appear in any document.\n");
    }

    #[test]
    fn document_report_lists_terms() {
        let idx = index();
        let text = document_text("doc1.txt", &document_summaries(&idx, "DOC1.txt"));
        assert!(text.starts_with("The document 'doc1.txt' contains 4 word(s):\n"));
        assert!(text.contains("  Word: mat | Frequency: 1\n    Positions: [6]\n"));
    }

    #[test]
    fn search_report_formats_empty_results() {
        let none = BTreeSet::new();
        let some: BTreeSet<String> = ["a.txt".to_string(), "b.txt".to_string()].into_iter().collect();
        let text = search_text(&[SearchReport { query: "x", results: &none }, SearchReport { query: "y", results: &some }]);
        assert_eq!(text, "Query: x\nResults: No matching documents.\n\nQuery: y\nResults: a.txt, b.txt\n\n");
    }

    #[test]
    fn snippet_report_lists_windows_and_missing() {
        use posdex_core::snippet::{Snippet, WindowToken};
        let mut set = SnippetSet::default();
        let window = vec![
            WindowToken { position: 1, text: "The".into() },
            WindowToken { position: 2, text: "cat".into() },
        ];
        set.documents.insert("doc1.txt".into(), vec![Snippet { position: 2, window }]);
        set.missing.push("gone.txt".into());
        let per_term: BTreeMap<String, SnippetSet> = [("cat".to_string(), set)].into_iter().collect();
        assert_eq!(
            snippets_text("cat", &per_term),
            "Query: cat\nDocument: doc1.txt\n  Position 2: [Index 1: The] [Index 2: cat]\nDocument: gone.txt (not found)\n"
        );
    }

    #[test]
    fn dump_lists_every_term() {
        let text = index_text(&index());
        assert!(text.contains("Word: cat\n  Document: doc1.txt -> [2]\n  Document: doc2.txt -> [1, 2]\n"));
        assert!(!text.contains("Word: the"));
    }
}
