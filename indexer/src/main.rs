use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::{
    process_queries, process_queries_joined, remove_duplicates, DocumentId, DocumentStatus, Execution, SearchIndex,
};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocumentId,
    text: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long)]
    input: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// File with space-separated stop words; overrides --stop-words
    #[arg(long)]
    stop_words_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query as JSON
    Search {
        #[arg(long)]
        query: String,
        /// Only documents with this status (ACTUAL, IRRELEVANT, BANNED, REMOVED)
        #[arg(long, default_value = "ACTUAL")]
        status: DocumentStatus,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Print the query words found in one document
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocumentId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Run one query per line of a file
    Batch {
        #[arg(long)]
        queries: String,
        /// Print a single flattened list instead of one list per query
        #[arg(long, default_value_t = false)]
        joined: bool,
    },
    /// Remove documents whose word sets repeat an earlier document
    Dedup,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let mut index = load_index(&cli.corpus)?;

    match cli.command {
        Commands::Search { query, status, parallel } => {
            let found = index.find_top_documents_with(execution(parallel), &query, move |_, s, _| s == status)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Match { query, id, parallel } => {
            let (words, status) = index.match_document_with(execution(parallel), &query, id)?;
            let words: Vec<&str> = words.iter().map(|t| t.as_str()).collect();
            println!("{{ document_id = {id}, status = {status}, words = {} }}", words.join(" "));
        }
        Commands::Batch { queries, joined } => {
            let text = fs::read_to_string(&queries).with_context(|| format!("reading {queries}"))?;
            let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            if joined {
                for doc in process_queries_joined(&index, &lines)? {
                    println!("{doc}");
                }
            } else {
                for (line, found) in lines.iter().zip(process_queries(&index, &lines)?) {
                    println!("{} documents for query: {line}", found.len());
                    for doc in found {
                        println!("  {doc}");
                    }
                }
            }
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut index);
            for id in &removed {
                println!("Found duplicate document id {id}");
            }
            println!("{} documents remain", index.document_count());
        }
    }
    Ok(())
}

fn execution(parallel: bool) -> Execution {
    if parallel { Execution::Parallel } else { Execution::Sequential }
}

fn load_index(args: &CorpusArgs) -> Result<SearchIndex> {
    let stop_words = match &args.stop_words_file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => args.stop_words.clone(),
    };
    let mut index = SearchIndex::from_stop_words_text(stop_words.trim_end())?;

    let input_path = Path::new(&args.input);
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", args.input);
    }

    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            ingest_doc(&mut index, doc);
        }
    }

    tracing::info!(num_docs = index.document_count(), num_terms = index.term_count(), "ingested documents");
    Ok(index)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line).with_context(|| format!("parsing {}", file.display()))?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<_>, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

/// A rejected document is logged and skipped; the rest of the corpus still loads.
fn ingest_doc(index: &mut SearchIndex, doc: InputDoc) {
    let status = match doc.status.as_deref().map(str::parse::<DocumentStatus>).transpose() {
        Ok(status) => status.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(id = doc.id, %err, "skipping document");
            return;
        }
    };
    if let Err(err) = index.add_document(doc.id, &doc.text, status, &doc.ratings) {
        tracing::warn!(id = doc.id, %err, "skipping document");
    }
}
