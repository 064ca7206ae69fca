use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Error, Result};

/// Stopword list, normalized to trimmed lowercase. Keeps the order words were
/// first seen in so that a rewritten list matches its source.
#[derive(Debug, Default, Clone)]
pub struct StopwordSet {
    order: Vec<String>,
    members: HashSet<String>,
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

impl StopwordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one word per line. Blank lines are ignored, duplicates logged and dropped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Stopwords { path: path.to_path_buf(), source })?;
        let mut set = Self::new();
        for line in text.lines() {
            let word = normalize(line);
            if word.is_empty() {
                continue;
            }
            if !set.insert(&word) {
                tracing::warn!(%word, "duplicate stopword ignored");
            }
        }
        tracing::info!(count = set.len(), path = %path.display(), "loaded stopwords");
        Ok(set)
    }

    /// Returns false if the word was blank or already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = normalize(word);
        if word.is_empty() || self.members.contains(&word) {
            return false;
        }
        self.members.insert(word.clone());
        self.order.push(word);
        true
    }

    pub fn remove(&mut self, word: &str) -> bool {
        let word = normalize(word);
        if !self.members.remove(&word) {
            return false;
        }
        self.order.retain(|w| *w != word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(&normalize(word))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        for word in &self.order {
            writeln!(w, "{word}")?;
        }
        w.flush()?;
        Ok(())
    }
}

impl<'a> FromIterator<&'a str> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}
