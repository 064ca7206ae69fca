//! Document sources: where document text comes from, keyed by lowercased file name.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{Error, Result};

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]+>").expect("valid regex");
    static ref SPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Supplies document identifiers and their text payloads.
pub trait DocumentSource {
    /// Lowercased identifiers, sorted.
    fn document_ids(&self) -> Result<Vec<String>>;
    /// Text of one document, or `None` if it is not available.
    fn read(&self, id: &str) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Html,
}

impl DocumentKind {
    /// Classify by extension of the (lowercased) file name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.ends_with(".txt") {
            Some(DocumentKind::Text)
        } else if name.ends_with(".html") {
            Some(DocumentKind::Html)
        } else {
            None
        }
    }
}

/// Drop markup and collapse whitespace so HTML reads as one line of text.
pub fn strip_html(raw: &str) -> String {
    let joined = raw.lines().collect::<Vec<_>>().join(" ");
    let untagged = TAG.replace_all(&joined, " ");
    SPACE.replace_all(&untagged, " ").trim().to_string()
}

/// A flat directory of `.txt` and `.html` files, listed once when opened.
#[derive(Debug, Clone)]
pub struct CorpusDir {
    files: BTreeMap<String, PathBuf>,
}

impl CorpusDir {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidCorpus(root.to_path_buf()));
        }
        let mut entries: Vec<(String, PathBuf)> = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().to_lowercase();
                DocumentKind::from_name(&name).map(|_| (name, e.path().to_path_buf()))
            })
            .collect();
        entries.sort();
        let mut files = BTreeMap::new();
        for (name, path) in entries {
            files.entry(name).or_insert(path);
        }
        Ok(Self { files })
    }
}

impl DocumentSource for CorpusDir {
    fn document_ids(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<Option<String>> {
        let id = id.to_lowercase();
        let Some(path) = self.files.get(&id) else {
            return Ok(None);
        };
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let raw = String::from_utf8_lossy(&bytes);
        let text = match DocumentKind::from_name(&id) {
            Some(DocumentKind::Html) => strip_html(&raw),
            _ => raw.into_owned(),
        };
        Ok(Some(text))
    }
}

/// In-memory corpus, keyed by document name.
impl DocumentSource for BTreeMap<String, String> {
    fn document_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.keys().map(|k| k.to_lowercase()).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<Option<String>> {
        let id = id.to_lowercase();
        Ok(self.iter().find(|(k, _)| k.to_lowercase() == id).map(|(_, v)| v.clone()))
    }
}
