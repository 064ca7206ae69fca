use crate::{Error, InvertedIndex, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub stemming: bool,
    pub created_at: String,
    pub version: u32,
}

/// Snapshot file layout inside an index directory. Stemmed and plain indexes are kept apart.
pub struct IndexPaths {
    pub root: PathBuf,
}

fn flavor(stemming: bool) -> &'static str {
    if stemming { "stemmed" } else { "plain" }
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn snapshot(&self, stemming: bool) -> PathBuf { self.root.join(format!("index.{}.bin", flavor(stemming))) }
    pub fn meta(&self, stemming: bool) -> PathBuf { self.root.join(format!("meta.{}.json", flavor(stemming))) }
}

pub fn save_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let stemming = index.stemming();
    let mut f = File::create(paths.snapshot(stemming))?;
    let bytes = bincode::serialize(index)?;
    f.write_all(&bytes)?;

    let meta = MetaFile {
        num_docs: index.num_documents() as u32,
        num_terms: index.num_terms() as u32,
        stemming,
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_default(),
        version: SNAPSHOT_VERSION,
    };
    save_meta(paths, &meta)?;
    tracing::info!(path = %paths.snapshot(stemming).display(), "index snapshot saved");
    Ok(())
}

/// Load the snapshot for the given stemming mode. `Ok(None)` means there is none yet.
pub fn load_index(paths: &IndexPaths, stemming: bool) -> Result<Option<InvertedIndex>> {
    let path = paths.snapshot(stemming);
    let mut f = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no index snapshot found");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(meta) = load_meta(paths, stemming)? {
        if meta.version != SNAPSHOT_VERSION {
            return Err(Error::SnapshotVersion { found: meta.version, expected: SNAPSHOT_VERSION });
        }
    }
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index: InvertedIndex = bincode::deserialize(&buf)?;
    tracing::info!(path = %path.display(), num_terms = index.num_terms(), "index snapshot loaded");
    Ok(Some(index))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta(meta.stemming))?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths, stemming: bool) -> Result<Option<MetaFile>> {
    let mut f = match File::open(paths.meta(stemming)) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(Some(meta))
}
