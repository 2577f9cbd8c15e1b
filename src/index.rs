use crate::document::DocId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry in a term's posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the term in this document.
    pub term_frequency: u32,
}

/// Inverted index: term -> posting list, plus the per-document lengths and
/// aggregate statistics BM25 needs.
///
/// Built once per corpus snapshot and queried read-only afterwards. Posting
/// lists grow in document-insertion order, so iteration is deterministic for
/// a given build order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvertedIndex {
    index: HashMap<String, Vec<Posting>>,
    /// Indexed by internal document id.
    doc_lengths: Vec<u32>,
    doc_count: u32,
    total_length: u64,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tokenized document to the index. Returns the document length.
    ///
    /// `doc_id` must be the next dense id (equal to the current document
    /// count); ids are assigned by the engine in insertion order.
    pub fn add_document(&mut self, doc_id: DocId, term_frequencies: &HashMap<String, u32>) -> u32 {
        let length: u32 = term_frequencies.values().sum();

        for (term, &tf) in term_frequencies {
            self.index
                .entry(term.clone())
                .or_default()
                .push(Posting {
                    doc_id,
                    term_frequency: tf,
                });
        }

        let idx = doc_id as usize;
        if idx >= self.doc_lengths.len() {
            self.doc_lengths.resize(idx + 1, 0);
        }
        self.doc_lengths[idx] = length;
        self.doc_count += 1;
        self.total_length += u64::from(length);
        length
    }

    /// Posting list for a term, if any document contains it.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.index.get(term).map(Vec::as_slice)
    }

    /// Number of documents containing a term (df, for IDF).
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.index.get(term).map(Vec::len).unwrap_or(0)
    }

    /// Length (term count) of a document.
    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths
            .get(doc_id as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of indexed documents (N).
    pub fn total_documents(&self) -> u32 {
        self.doc_count
    }

    /// Average document length across the corpus (avgdl).
    pub fn avg_doc_length(&self) -> f64 {
        if self.doc_count == 0 {
            0.0
        } else {
            self.total_length as f64 / f64::from(self.doc_count)
        }
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.doc_count,
            total_terms: self.index.len(),
            avg_doc_length: self.avg_doc_length(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: u32,
    pub total_terms: usize,
    pub avg_doc_length: f64,
}
