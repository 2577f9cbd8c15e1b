// Re-export main components
pub mod api;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod index;
pub mod ranking;
pub mod storage;
pub mod tokenizer;

// Re-export commonly used types
pub use corpus::{CorpusConfig, CorpusFormat, RawDoc};
pub use document::{DocId, DocRecord, Hit};
pub use engine::{SearchEngine, SearchError, SearchOptions, SearchResult, DEFAULT_TOP_K};
pub use index::InvertedIndex;
pub use storage::Storage;
pub use tokenizer::Tokenizer;

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() -> Result<()> {
        let engine = SearchEngine::in_memory()?;

        engine.add_document(
            "Rust Programming Language",
            "langs.txt",
            "Rust is a blazingly fast and memory-efficient language",
        )?;

        let results = engine.search("rust language", &SearchOptions::default())?;

        assert_eq!(results.total, 1);
        assert!(!results.hits.is_empty());

        Ok(())
    }
}
