use anyhow::Result;
use clap::{Parser, Subcommand};
use corsearch::corpus::CorpusConfig;
use corsearch::engine::{SearchEngine, SearchOptions, DEFAULT_TOP_K};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "BM25 ranked retrieval over heterogeneous text corpora", long_about = None)]
struct Args {
    /// Index store location
    #[arg(short, long, default_value = "data/index")]
    index: PathBuf,

    /// Corpus directory (used when the index does not exist yet)
    #[arg(short, long, default_value = "data/corpus")]
    corpus: PathBuf,

    /// JSON file mapping corpus file names to formats; defaults to the
    /// stock science-corpus mapping
    #[arg(long)]
    corpus_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the index from the corpus directory if it does not exist yet
    Build,
    /// Run a query against the index, building it first if absent
    Search {
        /// Raw query text; reserved characters are treated literally
        query: String,

        /// Skip BM25 and return unranked candidates
        #[arg(long)]
        unranked: bool,

        /// Maximum number of hits
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        limit: usize,
    },
    /// Serve the read-only search API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.corpus_config {
        Some(path) => CorpusConfig::from_json_file(path)?,
        None => CorpusConfig::standard(),
    };

    let start = Instant::now();
    let engine = SearchEngine::open_or_build(&args.index, &args.corpus, &config)?;
    tracing::debug!(elapsed = ?start.elapsed(), "engine ready");

    match args.command {
        Command::Build => {
            let stats = engine.stats()?;
            println!(
                "Index ready: {} documents, {} terms, avg length {:.1}",
                stats.total_documents, stats.total_terms, stats.avg_doc_length
            );
        }
        Command::Search {
            query,
            unranked,
            limit,
        } => {
            let options = SearchOptions {
                ranked: !unranked,
                limit,
            };

            let start = Instant::now();
            let result = engine.search(&query, &options)?;
            let duration = start.elapsed();

            println!(
                "Search \"{}\" matched {} documents in {:?}",
                query, result.total, duration
            );
            println!();

            for (rank, hit) in result.hits.iter().enumerate() {
                println!(
                    "{:>2}. [{:.4}] {} ({})\n    {}",
                    rank + 1,
                    hit.score,
                    hit.name,
                    hit.corpus,
                    hit.text
                );
            }
        }
        Command::Serve { addr } => {
            let router = corsearch::api::create_router(Arc::new(engine));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "serving search API");
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
