use serde::{Deserialize, Serialize};

/// Internal document id: dense, assigned from 0 in insertion order, never
/// reused for the life of an index.
pub type DocId = u32;

/// A stored document: everything needed to render a search hit without
/// retokenizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRecord {
    pub id: DocId,
    /// Human-meaningful identifier from the source format (a title, a
    /// headword, or a synthesized "doc<i>" label).
    pub name: String,
    /// Name of the corpus file this document came from.
    pub corpus: String,
    /// Original text, retained verbatim for display.
    pub text: String,
    /// Number of terms after tokenization (BM25 length normalization).
    pub length: u32,
}

impl DocRecord {
    pub fn new(id: DocId, name: String, corpus: String, text: String, length: u32) -> Self {
        Self {
            id,
            name,
            corpus,
            text,
            length,
        }
    }
}

/// One ranked search hit: provenance, logical name, BM25 score, and the
/// stored text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    pub corpus: String,
    pub name: String,
    pub score: f64,
    pub text: String,
}
