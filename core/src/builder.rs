use crate::corpus::DocumentSource;
use crate::index::InvertedIndex;
use crate::stemmer::stem;
use crate::stopwords::StopwordSet;
use crate::tokenizer::tokenize;
use crate::Result;

/// Populates an [`InvertedIndex`] document by document.
pub struct IndexBuilder<'a> {
    stopwords: &'a StopwordSet,
    index: InvertedIndex,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(stopwords: &'a StopwordSet, stemming: bool) -> Self {
        Self { stopwords, index: InvertedIndex::new(stemming) }
    }

    /// Index one document's text under `document` (lowercased).
    ///
    /// Every token advances the position counter, stopwords included, so that
    /// positions line up with the raw token stream.
    pub fn add_document(&mut self, document: &str, text: &str) -> &mut Self {
        let document = document.to_lowercase();
        let stemming = self.index.stemming();
        let mut indexed = 0usize;
        for token in tokenize(text) {
            let word = token.text.to_lowercase();
            if self.stopwords.contains(&word) {
                continue;
            }
            let term = if stemming { stem(&word) } else { word };
            self.index.add_posting(term, &document, token.position);
            indexed += 1;
        }
        tracing::debug!(%document, indexed, "indexed document");
        self
    }

    /// Index every document the source lists, in identifier order.
    pub fn add_source<S: DocumentSource + ?Sized>(&mut self, source: &S) -> Result<&mut Self> {
        let ids = source.document_ids()?;
        if ids.is_empty() {
            tracing::info!("no text or HTML documents found");
        }
        for id in ids {
            match source.read(&id)? {
                Some(text) => {
                    self.add_document(&id, &text);
                    tracing::info!(document = %id, "indexed document");
                }
                None => tracing::warn!(document = %id, "document vanished before indexing"),
            }
        }
        Ok(self)
    }

    pub fn finish(self) -> InvertedIndex {
        tracing::info!(
            num_terms = self.index.num_terms(),
            num_docs = self.index.num_documents(),
            stemming = self.index.stemming(),
            "index build complete"
        );
        self.index
    }
}

/// Build a fresh index over a whole document source.
pub fn build_index<S: DocumentSource + ?Sized>(source: &S, stopwords: &StopwordSet, stemming: bool) -> Result<InvertedIndex> {
    let mut builder = IndexBuilder::new(stopwords, stemming);
    builder.add_source(source)?;
    Ok(builder.finish())
}
