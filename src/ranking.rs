use crate::document::DocId;
use crate::index::InvertedIndex;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// BM25 parameters
#[derive(Debug, Clone, Copy)]
pub struct Bm25 {
    k1: f64,
    b: f64,
}

impl Default for Bm25 {
    fn default() -> Self {
        Self {
            k1: 1.5, // Term frequency saturation parameter
            b: 0.75, // Length normalization parameter
        }
    }
}

impl Bm25 {
    pub fn new(k1: f64, b: f64) -> Self {
        Self { k1, b }
    }

    /// IDF with the "+1 inside the log" variant, which stays non-negative
    /// even for terms present in nearly every document.
    pub fn idf(&self, total_docs: u32, doc_freq: usize) -> f64 {
        let n = f64::from(total_docs);
        let df = doc_freq as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Score contribution of one query term for one document.
    pub fn term_score(&self, idf: f64, tf: u32, doc_length: u32, avg_doc_length: f64) -> f64 {
        let tf = f64::from(tf);
        let norm = 1.0 - self.b + self.b * (f64::from(doc_length) / avg_doc_length);
        idf * (tf * (self.k1 + 1.0)) / (tf + self.k1 * norm)
    }

    /// Accumulate BM25 scores for every candidate document: the union of the
    /// query terms' posting lists. Documents matching no query term never
    /// appear. Terms absent from the index contribute nothing.
    pub fn score_candidates(
        &self,
        query_terms: &[String],
        index: &InvertedIndex,
    ) -> HashMap<DocId, f64> {
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        let avg_doc_length = index.avg_doc_length();
        let total_docs = index.total_documents();

        for term in query_terms {
            let Some(postings) = index.postings(term) else {
                continue;
            };
            let idf = self.idf(total_docs, postings.len());
            for posting in postings {
                let score = self.term_score(
                    idf,
                    posting.term_frequency,
                    index.doc_length(posting.doc_id),
                    avg_doc_length,
                );
                *scores.entry(posting.doc_id).or_insert(0.0) += score;
            }
        }

        scores
    }
}

/// Ranked search result
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

// Ordering key: higher score first, ties by ascending doc id.
fn rank_key(doc: &ScoredDoc) -> (OrderedFloat<f64>, Reverse<DocId>) {
    (OrderedFloat(doc.score), Reverse(doc.doc_id))
}

/// Select the top `k` scored documents, descending by score with ties broken
/// by ascending internal id. Bounded min-heap, O(n log k).
pub fn top_k(scores: HashMap<DocId, f64>, k: usize) -> Vec<ScoredDoc> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<DocId>)>> =
        BinaryHeap::with_capacity(k + 1);
    for (doc_id, score) in scores {
        heap.push(Reverse(rank_key(&ScoredDoc { doc_id, score })));
        if heap.len() > k {
            heap.pop();
        }
    }

    let mut results: Vec<ScoredDoc> = heap
        .into_iter()
        .map(|Reverse((score, Reverse(doc_id)))| ScoredDoc {
            doc_id,
            score: score.0,
        })
        .collect();
    results.sort_unstable_by(|a, b| rank_key(b).cmp(&rank_key(a)));
    results
}
