mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use posdex_core::persist::{load_index, save_index, IndexPaths};
use posdex_core::query::boolean_and;
use posdex_core::snippet::{extract, SnippetSet};
use posdex_core::{build_index, CorpusDir, InvertedIndex, StopwordSet};
use report::SearchReport;
use tracing_subscriber::{fmt, EnvFilter};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "posdex")]
#[command(about = "Build and query a positional inverted index", long_about = None)]
struct Cli {
    /// Stopword list, one word per line (needed to build)
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,
    /// Corpus directory of .txt and .html files
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,
    /// Stem terms when indexing and querying
    #[arg(long, short = 's', global = true, default_value_t = false)]
    stem: bool,
    /// Directory holding index snapshots
    #[arg(long, global = true, default_value = "./index")]
    index_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from the corpus and save a snapshot
    Build {
        /// Rebuild even if a snapshot exists
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Boolean AND search, optionally with snippets
    Search {
        #[arg(long, required_unless_present = "query_file", conflicts_with = "query_file")]
        query: Option<String>,
        /// One query per line
        #[arg(long)]
        query_file: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Snippet radius in tokens
        #[arg(long, default_value_t = 0)]
        snip: usize,
        #[arg(long)]
        snip_output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show documents and positions for one word
    Word {
        term: String,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show indexed words and positions for one document
    Doc {
        name: String,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the whole index as text
    Dump {
        #[arg(long)]
        output: PathBuf,
    },
    /// Normalize and deduplicate a stopword list
    Stopwords {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    tracing::info!(stemming = cli.stem, index_dir = %cli.index_dir.display(), "starting");

    match &cli.command {
        Commands::Build { force } => {
            let index = open_index(&cli, *force)?;
            println!("Indexed {} term(s) across {} document(s).", index.num_terms(), index.num_documents());
            Ok(())
        }
        Commands::Search { query, query_file, output, snip, snip_output, json } => {
            let queries = match (query, query_file) {
                (Some(q), _) => vec![q.clone()],
                (None, Some(file)) => read_queries(file)?,
                (None, None) => bail!("either --query or --query-file is required"),
            };
            let index = open_index(&cli, false)?;
            run_search(&index, &queries, output.as_deref(), *json)?;
            if let (Some(out), true) = (snip_output, *snip > 0) {
                run_snippets(&cli, &index, &queries, *snip, out, *json)?;
            }
            Ok(())
        }
        Commands::Word { term, output, json } => {
            let index = open_index(&cli, false)?;
            let summaries = report::word_summaries(&index, term);
            let text = if *json { serde_json::to_string_pretty(&summaries)? } else { report::word_text(term, &summaries) };
            emit(output.as_deref(), &text)
        }
        Commands::Doc { name, output, json } => {
            let index = open_index(&cli, false)?;
            let summaries = report::document_summaries(&index, name);
            let text = if *json { serde_json::to_string_pretty(&summaries)? } else { report::document_text(name, &summaries) };
            emit(output.as_deref(), &text)
        }
        Commands::Dump { output } => {
            let index = open_index(&cli, false)?;
            emit(Some(output.as_path()), &report::index_text(&index))
        }
        Commands::Stopwords { input, output } => {
            let set = StopwordSet::load(input)?;
            set.write(output).with_context(|| format!("writing stopwords to {}", output.display()))?;
            tracing::info!(count = set.len(), output = %output.display(), "stopwords written");
            Ok(())
        }
    }
}

/// Load the snapshot for the current stemming mode, or build and save one from the corpus.
fn open_index(cli: &Cli, force: bool) -> Result<InvertedIndex> {
    let paths = IndexPaths::new(&cli.index_dir);
    if !force {
        let loaded = load_index(&paths, cli.stem)
            .with_context(|| format!("loading snapshot from {}", paths.snapshot(cli.stem).display()))?;
        if let Some(index) = loaded {
            return Ok(index);
        }
    }
    let Some(corpus_dir) = &cli.corpus else {
        bail!("no snapshot at {} and no --corpus to build one", paths.snapshot(cli.stem).display());
    };
    let Some(stopword_file) = &cli.stopwords else {
        bail!("--stopwords is required to build an index");
    };
    let stopwords = StopwordSet::load(stopword_file)?;
    let corpus = CorpusDir::open(corpus_dir)?;
    let index = build_index(&corpus, &stopwords, cli.stem)
        .with_context(|| format!("indexing {}", corpus_dir.display()))?;
    save_index(&paths, &index).with_context(|| format!("saving snapshot to {}", paths.root.display()))?;
    Ok(index)
}

fn read_queries(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading queries from {}", path.display()))?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
}

fn run_search(index: &InvertedIndex, queries: &[String], output: Option<&Path>, json: bool) -> Result<()> {
    let results: Vec<_> = queries.iter().map(|q| boolean_and(index, q)).collect();
    let reports: Vec<SearchReport> = queries
        .iter()
        .zip(&results)
        .map(|(query, results)| SearchReport { query, results })
        .collect();
    let text = if json { serde_json::to_string_pretty(&reports)? } else { report::search_text(&reports) };
    emit(output, &text)
}

fn run_snippets(cli: &Cli, index: &InvertedIndex, queries: &[String], radius: usize, output: &Path, json: bool) -> Result<()> {
    let Some(corpus_dir) = &cli.corpus else {
        bail!("--corpus is required to extract snippets");
    };
    let corpus = CorpusDir::open(corpus_dir)?;
    let mut text = String::new();
    let mut all: BTreeMap<&str, BTreeMap<String, SnippetSet>> = BTreeMap::new();
    for query in queries {
        let mut per_term = BTreeMap::new();
        for word in query.split_whitespace() {
            let term = index.normalize(word);
            let set = extract(index, &term, radius, &corpus)?;
            per_term.insert(term, set);
        }
        if !json {
            text.push_str(&report::snippets_text(query, &per_term));
        }
        all.insert(query, per_term);
    }
    if json {
        text = serde_json::to_string_pretty(&all)?;
    }
    emit(Some(output), &text)
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
