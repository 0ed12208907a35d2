//! tfidf-embed
//!
//! Fit a TF-IDF embedding model on text files and embed texts with it.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tfidf_embedding::{EmbedderConfig, TFIDFData, TFIDFEmbedder};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// TF-IDF embedding model tool
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a model on text files and save it
    Fit {
        /// Input files, one document each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Treat every non-empty line as its own document
        #[arg(long, default_value_t = false)]
        per_line: bool,

        /// Output model path (.json writes JSON, anything else CBOR)
        #[arg(short, long)]
        out: PathBuf,

        /// Batch size at which work moves to the thread pool
        #[arg(long, default_value_t = 64)]
        parallel_threshold: usize,
    },
    /// Embed texts (arguments, or stdin lines when none are given) as JSON arrays
    Embed {
        /// Model path
        #[arg(short, long)]
        model: PathBuf,

        texts: Vec<String>,
    },
    /// Print model statistics
    Info {
        /// Model path
        #[arg(short, long)]
        model: PathBuf,

        /// Number of vocabulary terms to list
        #[arg(long, default_value_t = 10)]
        terms: usize,
    },
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_model(path: &Path) -> anyhow::Result<TFIDFEmbedder> {
    let data = if is_json(path) {
        TFIDFData::load_json(path)
    } else {
        TFIDFData::load_cbor(path)
    }
    .with_context(|| format!("failed to load model from {}", path.display()))?;
    Ok(TFIDFEmbedder::from_data(data)?)
}

fn save_model(embedder: &TFIDFEmbedder, path: &Path) -> anyhow::Result<TFIDFData> {
    let data = embedder.to_data();
    if is_json(path) {
        data.save_json(path)
    } else {
        data.save_cbor(path)
    }
    .with_context(|| format!("failed to save model to {}", path.display()))?;
    Ok(data)
}

/// Split one input file into documents
fn split_documents(text: String, per_line: bool, docs: &mut Vec<String>) {
    if per_line {
        docs.extend(
            text.lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
    } else {
        docs.push(text);
    }
}

fn read_documents(inputs: &[PathBuf], per_line: bool) -> anyhow::Result<Vec<String>> {
    let mut docs = Vec::new();
    for input in inputs {
        let text = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        split_documents(text, per_line, &mut docs);
    }
    Ok(docs)
}

/// One JSON array per line
fn write_embeddings<W: Write>(out: &mut W, embedder: &TFIDFEmbedder, texts: &[String]) -> anyhow::Result<()> {
    for vec in embedder.embed_documents(texts) {
        serde_json::to_writer(&mut *out, &vec)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tfidf_embedding=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Fit {
            inputs,
            per_line,
            out,
            parallel_threshold,
        } => {
            let docs = read_documents(&inputs, per_line)?;
            let config = EmbedderConfig::default().with_parallel_threshold(parallel_threshold);
            let embedder: TFIDFEmbedder = TFIDFEmbedder::with_config(config);
            embedder.fit(&docs);
            let data = save_model(&embedder, &out)?;
            info!(path = %out.display(), dim = data.dim, "model saved");
        }
        Command::Embed { model, texts } => {
            let embedder = load_model(&model)?;
            let texts = if texts.is_empty() {
                io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
            } else {
                texts
            };
            let stdout = io::stdout();
            write_embeddings(&mut stdout.lock(), &embedder, &texts)?;
        }
        Command::Info { model, terms } => {
            let state = load_model(&model)?.snapshot();
            println!("dimension: {}", state.dimension());
            println!("documents: {}", state.doc_num());
            for (term, idx, idf) in state.iter().take(terms) {
                println!("{idx:>8}  {idf:>10.6}  {term}");
            }
        }
    }
    Ok(())
}
