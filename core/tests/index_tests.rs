use posdex_core::persist::{load_index, load_meta, save_index, save_meta, IndexPaths, MetaFile};
use posdex_core::query::boolean_and;
use posdex_core::snippet::extract;
use posdex_core::tokenizer::raw_tokens;
use posdex_core::{build_index, CorpusDir, DocumentSource, Error, StopwordSet};
use std::fs;
use tempfile::tempdir;

fn write_corpus(dir: &std::path::Path) {
    fs::write(dir.join("Doc1.txt"), "The cat sat on a mat.\nThe mat was flat.").unwrap();
    fs::write(dir.join("doc2.txt"), "A dog and a cat, running together.").unwrap();
    fs::write(
        dir.join("page.HTML"),
        "<html><head><title>Cats</title></head>\n<body><p>Running cats <b>love</b> the mat</p></body></html>",
    )
    .unwrap();
    fs::write(dir.join("notes.md"), "cat cat cat").unwrap();
}

fn stopwords() -> StopwordSet {
    ["the", "a", "on", "and", "was"].into_iter().collect()
}

#[test]
fn builds_from_directory() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let corpus = CorpusDir::open(dir.path()).unwrap();
    assert_eq!(corpus.document_ids().unwrap(), vec!["doc1.txt", "doc2.txt", "page.html"]);

    let index = build_index(&corpus, &stopwords(), false).unwrap();
    assert_eq!(index.lookup_term("cat")["doc1.txt"], vec![2]);
    assert_eq!(index.lookup_term("MAT")["doc1.txt"], vec![6, 8]);
    assert_eq!(index.lookup_term("cats")["page.html"], vec![1, 3]);
    assert!(index.lookup_term("the").is_empty());
    assert!(!index.lookup_term("cat").contains_key("notes.md"));
    assert_eq!(index.num_documents(), 3);
}

#[test]
fn every_posting_points_at_its_raw_token() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let corpus = CorpusDir::open(dir.path()).unwrap();
    let sw = stopwords();
    for stemming in [false, true] {
        let index = build_index(&corpus, &sw, stemming).unwrap();
        for (term, docs) in index.terms() {
            for (doc, positions) in docs {
                let raw = raw_tokens(&corpus.read(doc).unwrap().unwrap());
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
                for &p in positions {
                    let token = &raw[p as usize - 1];
                    assert!(!sw.contains(token));
                    assert_eq!(index.normalize(token), term);
                }
            }
        }
    }
}

#[test]
fn stemmed_queries() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let corpus = CorpusDir::open(dir.path()).unwrap();
    let index = build_index(&corpus, &stopwords(), true).unwrap();
    let hits = boolean_and(&index, "cats run");
    assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec!["doc2.txt", "page.html"]);
    assert!(boolean_and(&index, "cat unicorn").is_empty());
}

#[test]
fn invalid_corpus_is_fatal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();
    assert!(matches!(CorpusDir::open(&file), Err(Error::InvalidCorpus(_))));
    assert!(matches!(CorpusDir::open(dir.path().join("nope")), Err(Error::InvalidCorpus(_))));
}

#[test]
fn empty_corpus_builds_empty_index() {
    let dir = tempdir().unwrap();
    let corpus = CorpusDir::open(dir.path()).unwrap();
    let index = build_index(&corpus, &stopwords(), false).unwrap();
    assert!(index.is_empty());
}

#[test]
fn snapshot_round_trip() {
    let corpus_dir = tempdir().unwrap();
    write_corpus(corpus_dir.path());
    let corpus = CorpusDir::open(corpus_dir.path()).unwrap();
    let index = build_index(&corpus, &stopwords(), true).unwrap();

    let out = tempdir().unwrap();
    let paths = IndexPaths::new(out.path().join("idx"));
    assert!(load_index(&paths, true).unwrap().is_none());
    save_index(&paths, &index).unwrap();

    let loaded = load_index(&paths, true).unwrap().unwrap();
    assert_eq!(loaded, index);
    assert_eq!(boolean_and(&loaded, "cat mat"), boolean_and(&index, "cat mat"));
    assert!(load_index(&paths, false).unwrap().is_none());

    let meta = load_meta(&paths, true).unwrap().unwrap();
    assert!(meta.stemming);
    assert_eq!(meta.num_docs, 3);
    assert_eq!(meta.num_terms as usize, index.num_terms());
}

#[test]
fn snapshot_version_mismatch_is_rejected() {
    let out = tempdir().unwrap();
    let paths = IndexPaths::new(out.path());
    let index = build_index(&std::collections::BTreeMap::<String, String>::new(), &stopwords(), false).unwrap();
    save_index(&paths, &index).unwrap();
    let meta = MetaFile { num_docs: 0, num_terms: 0, stemming: false, created_at: String::new(), version: 99 };
    save_meta(&paths, &meta).unwrap();
    assert!(matches!(load_index(&paths, false), Err(Error::SnapshotVersion { found: 99, .. })));
}

#[test]
fn snippets_from_html_source() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let corpus = CorpusDir::open(dir.path()).unwrap();
    let index = build_index(&corpus, &stopwords(), false).unwrap();

    let set = extract(&index, &index.normalize("mat"), 1, &corpus).unwrap();
    assert!(set.missing.is_empty());
    let page = &set.documents["page.html"];
    let texts: Vec<&str> = page[0].window.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["the", "mat"]);

    fs::remove_file(dir.path().join("Doc1.txt")).unwrap();
    let set = extract(&index, "mat", 2, &corpus).unwrap();
    assert_eq!(set.missing, vec!["doc1.txt".to_string()]);
    assert!(set.documents.contains_key("page.html"));
}

#[test]
fn stopwords_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stop.txt");
    fs::write(&path, "The\n  a \n\nthe\nOF\n").unwrap();
    let set = StopwordSet::load(&path).unwrap();
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["the", "a", "of"]);

    let out = dir.path().join("out.txt");
    set.write(&out).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "the\na\nof\n");

    assert!(matches!(StopwordSet::load(dir.path().join("missing.txt")), Err(Error::Stopwords { .. })));
}
