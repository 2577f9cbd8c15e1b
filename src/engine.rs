use crate::corpus::{load_corpus_dir, CorpusConfig, RawDoc};
use crate::document::{DocId, DocRecord, Hit};
use crate::index::{IndexStats, InvertedIndex};
use crate::ranking::{top_k, Bm25};
use crate::storage::Storage;
use crate::tokenizer::Tokenizer;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Default number of hits returned per query.
pub const DEFAULT_TOP_K: usize = 20;

/// Characters with reserved meaning in common query syntaxes. Escaping them
/// up front means the raw input is always plain term text: `topic:science`
/// searches for the words, it is not a field query.
const RESERVED_QUERY_CHARS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/',
];

#[derive(Debug, Error)]
pub enum SearchError {
    /// Querying before any build has occurred. Distinct from an empty result
    /// list, which means the index exists but nothing matched.
    #[error("no index has been built yet")]
    IndexNotFound,
    /// The index is already built; this design is build-once, query-only.
    #[error("index is already built and cannot be rebuilt in place")]
    IndexAlreadyBuilt,
    /// A posting referenced a document with no stored record. Index
    /// corruption, unrecoverable.
    #[error("posting references document {0} with no stored record")]
    DocRecordMissing(DocId),
}

/// Search options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// BM25 ranking when true; the unranked path returns candidates in
    /// ascending id order without meaningful scores.
    pub ranked: bool,
    /// Top-K bound on the number of hits returned.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ranked: true,
            limit: DEFAULT_TOP_K,
        }
    }
}

/// Search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub hits: Vec<Hit>,
    /// Number of candidate documents matching at least one query term,
    /// before the top-K cut.
    pub total: usize,
}

/// The retrieval engine: owns the tokenizer configuration, the index store
/// handle, and the in-memory inverted index.
///
/// Usage is build-then-read-only. The one-time build populates the index;
/// after that every query works purely from read state, so concurrent
/// readers are safe behind the shared lock.
pub struct SearchEngine {
    storage: Storage,
    index: Arc<RwLock<Option<InvertedIndex>>>,
    tokenizer: Tokenizer,
    bm25: Bm25,
}

impl SearchEngine {
    /// Open an engine backed by a durable store, reloading any index a
    /// previous process persisted there.
    pub fn open<P: AsRef<Path>>(storage_path: P) -> Result<Self> {
        let storage = Storage::open(storage_path)?;
        let index = storage.load_index()?;
        Ok(Self {
            storage,
            index: Arc::new(RwLock::new(index)),
            tokenizer: Tokenizer::new(),
            bm25: Bm25::default(),
        })
    }

    /// Create an in-memory engine (for tests and embedding)
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            storage: Storage::in_memory()?,
            index: Arc::new(RwLock::new(None)),
            tokenizer: Tokenizer::new(),
            bm25: Bm25::default(),
        })
    }

    /// Cold-start convenience: reopen the index at `storage_path` if one is
    /// already persisted there, otherwise run a full build from the corpus
    /// directory. An existing index is never revalidated against the corpus.
    pub fn open_or_build<P: AsRef<Path>>(
        storage_path: P,
        corpus_dir: &Path,
        config: &CorpusConfig,
    ) -> Result<Self> {
        let engine = Self::open(storage_path)?;
        if engine.storage.has_index()? {
            tracing::info!("reusing persisted index");
        } else {
            let docs = load_corpus_dir(corpus_dir, config)?;
            let count = engine.build_from_corpus(docs)?;
            tracing::info!(documents = count, "built index from corpus");
        }
        Ok(engine)
    }

    /// Add a single document, assigning the next internal id. Empty text is
    /// legal: the document gets length 0 and no postings, so no query can
    /// reach it.
    pub fn add_document(&self, name: &str, corpus: &str, text: &str) -> Result<DocId> {
        let mut guard = self.index.write().unwrap();
        let index = guard.get_or_insert_with(InvertedIndex::new);

        let id = index.total_documents();
        let frequencies = self.tokenizer.analyze_with_frequencies(text);
        let length = index.add_document(id, &frequencies);

        let record = DocRecord::new(id, name.to_string(), corpus.to_string(), text.to_string(), length);
        self.storage.save_document(&record)?;
        Ok(id)
    }

    /// Batch-build the index from an ingested corpus, then persist it.
    /// Valid at most once per store: a built index is query-only.
    pub fn build_from_corpus(&self, docs: impl IntoIterator<Item = RawDoc>) -> Result<u32> {
        if self.storage.has_index()? || self.index.read().unwrap().is_some() {
            return Err(SearchError::IndexAlreadyBuilt.into());
        }

        for doc in docs {
            self.add_document(&doc.name, &doc.corpus, &doc.text)?;
        }

        let mut guard = self.index.write().unwrap();
        let index = guard.get_or_insert_with(InvertedIndex::new);
        self.storage.save_index(index)?;
        self.storage.flush()?;
        Ok(index.total_documents())
    }

    /// Neutralize reserved query-syntax characters so the whole input is
    /// treated as literal term text.
    fn escape_query(raw: &str) -> String {
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            if RESERVED_QUERY_CHARS.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    /// Escape and tokenize a raw query with the indexing tokenizer, keeping
    /// each distinct term once in first-occurrence order. Scoring needs term
    /// identity only, never query-side frequency.
    fn query_terms(&self, raw: &str) -> Vec<String> {
        let escaped = Self::escape_query(raw);
        let mut seen = HashSet::new();
        self.tokenizer
            .analyze(&escaped)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    /// Answer a free-text query with the top-K ranked hits.
    ///
    /// A query that normalizes to zero terms, or matches no document, yields
    /// an empty result list. Querying before any build is an error
    /// ([`SearchError::IndexNotFound`]) so callers can tell "no index" from
    /// "no results".
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResult> {
        let guard = self.index.read().unwrap();
        let index = guard.as_ref().ok_or(SearchError::IndexNotFound)?;

        let terms = self.query_terms(query);
        if terms.is_empty() {
            return Ok(SearchResult {
                hits: Vec::new(),
                total: 0,
            });
        }

        let (ranked_ids, total) = if options.ranked {
            let scores = self.bm25.score_candidates(&terms, index);
            let total = scores.len();
            let top = top_k(scores, options.limit);
            (top.into_iter().map(|s| (s.doc_id, s.score)).collect::<Vec<_>>(), total)
        } else {
            // Unranked: candidate union in ascending id order, no scores.
            let mut ids: Vec<DocId> = terms
                .iter()
                .filter_map(|t| index.postings(t))
                .flatten()
                .map(|p| p.doc_id)
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            ids.sort_unstable();
            let total = ids.len();
            ids.truncate(options.limit);
            (ids.into_iter().map(|id| (id, 0.0)).collect(), total)
        };

        let mut hits = Vec::with_capacity(ranked_ids.len());
        for (id, score) in ranked_ids {
            let record = self
                .storage
                .get_document(id)?
                .ok_or(SearchError::DocRecordMissing(id))?;
            hits.push(Hit {
                corpus: record.corpus,
                name: record.name,
                score,
                text: record.text,
            });
        }

        Ok(SearchResult { hits, total })
    }

    /// Get index statistics
    pub fn stats(&self) -> Result<IndexStats> {
        let guard = self.index.read().unwrap();
        let index = guard.as_ref().ok_or(SearchError::IndexNotFound)?;
        Ok(index.stats())
    }

    /// Get total document count
    pub fn document_count(&self) -> Result<usize> {
        self.storage.count_documents()
    }
}
