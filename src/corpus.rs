use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Per-file line format of a corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusFormat {
    /// `name \t text` — one document per line.
    NameTabText,
    /// `word \t part-of-speech \t text` — the three fields concatenated into
    /// one blob per line, names synthesized as `doc<i>`.
    TripleField,
    /// Headword on its own line, indented explanation on the next; the two
    /// physical lines form one document named after the headword.
    HeadwordBlock,
    /// One document per raw line, names synthesized as `doc<i>`.
    LinePerDoc,
}

/// A document as produced by an ingestion adapter, before ids are assigned.
#[derive(Debug, Clone)]
pub struct RawDoc {
    pub name: String,
    pub text: String,
    /// File name of the originating corpus.
    pub corpus: String,
}

/// Explicit file-name -> format mapping. Files not registered here are
/// skipped (with a warning) rather than failing the build, since mixed
/// corpus directories are expected to contain stray files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorpusConfig {
    formats: HashMap<String, CorpusFormat>,
}

impl CorpusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mapping from a JSON file of the shape
    /// `{"wiki.txt": "name_tab_text", "defs.txt": "triple_field"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse corpus config {}", path.display()))
    }

    /// Mapping for the stock science corpus this system ships against:
    /// wiki dumps and CK-12 books as `name \t text`, the Wiktionary
    /// definitions as triples, and the kids' science dictionary as
    /// headword blocks.
    pub fn standard() -> Self {
        let mut config = Self::new();
        for name in [
            "Wikipedia-20160210171947.xml.txt",
            "wiki_summary.txt",
            "wiki_content.txt",
            "virginia_SOL20Study20Guide.filtered.noquestions.docids.txt",
            "CK12_Biology.txt.clean",
            "CK12_chemistry.txt.clean",
            "CK12_Earth_Science.txt.clean",
            "CK12_Life_Science.txt.clean",
            "CK-12-Biology-Advanced-Concepts.txt.clean",
            "CK-12-Biology-Concepts.txt.clean",
            "CK-12-Biology-Concepts_b.txt.clean",
            "CK-12-Chemistry-Concepts-Intermediate.txt.clean",
            "CK-12-Earth-Science-Concepts-For-High-School.txt.clean",
            "CK-12-Earth-Science-Concepts-For-Middle-School.txt.clean",
            "CK-12-Life-Science-Concepts-For-Middle-School.txt.clean",
            "CK-12-Physical-Science-Concepts-For-Middle-School.txt.clean",
            "CK-12-Physics-Concepts-Intermediate.txt.clean",
        ] {
            config.register(name, CorpusFormat::NameTabText);
        }
        config.register("simpleWiktionary-defs-apr30.txt", CorpusFormat::TripleField);
        config.register(
            "Science_Dictionary_for_Kids_book_filtered.txt",
            CorpusFormat::HeadwordBlock,
        );
        config
    }

    pub fn register(&mut self, file_name: impl Into<String>, format: CorpusFormat) -> &mut Self {
        self.formats.insert(file_name.into(), format);
        self
    }

    pub fn format_for(&self, file_name: &str) -> Option<CorpusFormat> {
        self.formats.get(file_name).copied()
    }
}

/// Parse one corpus file's content into (name, text) pairs.
pub fn parse_corpus(format: CorpusFormat, content: &str) -> Vec<(String, String)> {
    match format {
        CorpusFormat::NameTabText => content
            .lines()
            .filter_map(|line| {
                let Some((name, text)) = line.split_once('\t') else {
                    tracing::warn!("dropping line without tab delimiter");
                    return None;
                };
                Some((name.to_string(), text.trim().to_string()))
            })
            .collect(),
        CorpusFormat::TripleField => content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let mut fields = line.splitn(3, '\t');
                let word = fields.next()?;
                let pos = fields.next()?;
                let text = fields.next()?.trim();
                Some((format!("doc{i}"), format!("{word} {pos} {text}")))
            })
            .collect(),
        CorpusFormat::HeadwordBlock => {
            let mut docs = Vec::new();
            let mut headword: Option<String> = None;
            for line in content.lines() {
                if line.starts_with('\t') {
                    if let Some(word) = &headword {
                        docs.push((word.clone(), format!("{} {}", word, line.trim())));
                    }
                } else if !line.trim().is_empty() {
                    headword = Some(line.trim().to_string());
                }
            }
            docs
        }
        CorpusFormat::LinePerDoc => content
            .lines()
            .enumerate()
            .map(|(i, line)| (format!("doc{i}"), line.trim().to_string()))
            .collect(),
    }
}

/// Read one corpus file through its adapter.
pub fn read_corpus_file(path: &Path, format: CorpusFormat) -> Result<Vec<RawDoc>> {
    let corpus = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file {}", path.display()))?;

    let docs = parse_corpus(format, &content)
        .into_iter()
        .map(|(name, text)| RawDoc {
            name,
            text,
            corpus: corpus.clone(),
        })
        .collect();
    Ok(docs)
}

/// Enumerate a corpus directory and run every recognized file through its
/// adapter. Files without a registered format contribute no documents; the
/// skip is logged loudly because it is otherwise invisible in the results.
/// Files are visited in name order so id assignment is deterministic.
pub fn load_corpus_dir(dir: &Path, config: &CorpusConfig) -> Result<Vec<RawDoc>> {
    let mut file_names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read corpus directory {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            file_names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    file_names.sort();

    let mut docs = Vec::new();
    for file_name in file_names {
        match config.format_for(&file_name) {
            Some(format) => {
                let file_docs = read_corpus_file(&dir.join(&file_name), format)?;
                tracing::info!(file = %file_name, documents = file_docs.len(), "ingested corpus file");
                docs.extend(file_docs);
            }
            None => {
                tracing::warn!(file = %file_name, "no format registered, skipping corpus file");
            }
        }
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tab_text() {
        let docs = parse_corpus(
            CorpusFormat::NameTabText,
            "Photosynthesis\tPlants convert light.\nOsmosis\tWater crosses membranes.\n",
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].0, "Photosynthesis");
        assert_eq!(docs[0].1, "Plants convert light.");
    }

    #[test]
    fn test_name_tab_text_drops_malformed_line() {
        let docs = parse_corpus(CorpusFormat::NameTabText, "no delimiter here\nok\ttext\n");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].0, "ok");
    }

    #[test]
    fn test_triple_field_concatenates() {
        let docs = parse_corpus(
            CorpusFormat::TripleField,
            "atom\tnoun\tthe smallest unit of matter\n",
        );
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].0, "doc0");
        assert_eq!(docs[0].1, "atom noun the smallest unit of matter");
    }

    #[test]
    fn test_headword_block_pairs_lines() {
        let docs = parse_corpus(
            CorpusFormat::HeadwordBlock,
            "gravity\n\tthe force that attracts bodies\nmass\n\tthe amount of matter\n",
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].0, "gravity");
        assert_eq!(docs[0].1, "gravity the force that attracts bodies");
        assert_eq!(docs[1].0, "mass");
    }

    #[test]
    fn test_line_per_doc_synthesizes_names() {
        let docs = parse_corpus(CorpusFormat::LinePerDoc, "first line\nsecond line\n");
        assert_eq!(docs[0].0, "doc0");
        assert_eq!(docs[1].0, "doc1");
        assert_eq!(docs[1].1, "second line");
    }

    #[test]
    fn test_config_json_round_trip() {
        let json = r#"{"wiki.txt": "name_tab_text", "defs.txt": "triple_field"}"#;
        let config: CorpusConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.format_for("wiki.txt"), Some(CorpusFormat::NameTabText));
        assert_eq!(config.format_for("defs.txt"), Some(CorpusFormat::TripleField));

        let back = serde_json::to_string(&config).unwrap();
        let again: CorpusConfig = serde_json::from_str(&back).unwrap();
        assert_eq!(again.format_for("wiki.txt"), Some(CorpusFormat::NameTabText));
    }

    #[test]
    fn test_standard_config_mapping() {
        let config = CorpusConfig::standard();
        assert_eq!(
            config.format_for("wiki_summary.txt"),
            Some(CorpusFormat::NameTabText)
        );
        assert_eq!(
            config.format_for("simpleWiktionary-defs-apr30.txt"),
            Some(CorpusFormat::TripleField)
        );
        assert_eq!(
            config.format_for("Science_Dictionary_for_Kids_book_filtered.txt"),
            Some(CorpusFormat::HeadwordBlock)
        );
        assert_eq!(config.format_for("notes.md"), None);
    }
}
