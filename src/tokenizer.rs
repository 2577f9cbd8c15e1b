use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

lazy_static::lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        [
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
            "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being",
            "below", "between", "both", "but", "by", "can't", "cannot", "could", "couldn't",
            "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during",
            "each", "few", "for", "from", "further", "had", "hadn't", "has", "hasn't",
            "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
            "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i",
            "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's",
            "its", "itself", "let's", "me", "more", "most", "mustn't", "my", "myself",
            "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other", "ought",
            "our", "ours", "ourselves", "out", "over", "own", "same", "shan't", "she",
            "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
            "than", "that", "that's", "the", "their", "theirs", "them", "themselves",
            "then", "there", "there's", "these", "they", "they'd", "they'll", "they're",
            "they've", "this", "those", "through", "to", "too", "under", "until", "up",
            "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
            "weren't", "what", "what's", "when", "when's", "where", "where's", "which",
            "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would",
            "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
            "yourself", "yourselves",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Text analyzer shared by indexing and querying. Both sides must run the
/// same configuration or term matching silently breaks, so the engine owns a
/// single instance and hands it to both paths.
///
/// Normalization is Unicode word segmentation, lowercasing, and stop-word
/// removal. Terms match by exact string equality; there is no stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Split text into word tokens on Unicode word boundaries.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }

    /// Convert tokens to lowercase
    fn lowercase_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| t.to_lowercase()).collect()
    }

    /// Remove stopwords
    fn stopword_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !STOPWORDS.contains(t.as_str()))
            .collect()
    }

    /// Full analysis pipeline
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let tokens = self.lowercase_filter(tokens);
        self.stopword_filter(tokens)
    }

    /// Analyze and count term frequencies (for indexing)
    pub fn analyze_with_frequencies(&self, text: &str) -> HashMap<String, u32> {
        let mut frequencies = HashMap::new();
        for token in self.analyze(text) {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Hello, World! This is a test.");
        assert_eq!(tokens, vec!["Hello", "World", "This", "is", "a", "test"]);
    }

    #[test]
    fn test_analyze() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("The quick brown fox jumps");
        assert!(tokens.contains(&"quick".to_string()));
        assert!(tokens.contains(&"brown".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let tokenizer = Tokenizer::new();
        let text = "Mitochondria are the powerhouse of the cell";
        assert_eq!(tokenizer.analyze(text), tokenizer.analyze(text));
    }

    #[test]
    fn test_no_stemming() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("running runs");
        assert_eq!(tokens, vec!["running", "runs"]);
    }

    #[test]
    fn test_punctuation_only_yields_no_terms() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.analyze("... !!! ???").is_empty());
        assert!(tokenizer.analyze("").is_empty());
    }

    #[test]
    fn test_frequencies() {
        let tokenizer = Tokenizer::new();
        let freqs = tokenizer.analyze_with_frequencies("cat dog cat");
        assert_eq!(freqs.get("cat"), Some(&2));
        assert_eq!(freqs.get("dog"), Some(&1));
    }
}
