use anyhow::Result;
use corsearch::{CorpusConfig, CorpusFormat, SearchEngine, SearchOptions};
use std::fs;
use tempfile::TempDir;

fn write_corpus(dir: &TempDir) -> Result<()> {
    fs::write(
        dir.path().join("wiki.txt"),
        "Photosynthesis\tPlants use light energy to make sugar from carbon dioxide\n\
         Gravity\tGravity is the force that attracts two bodies toward each other\n",
    )?;
    fs::write(
        dir.path().join("definitions.txt"),
        "atom\tnoun\tthe smallest unit of ordinary matter\n\
         molecule\tnoun\ta group of atoms bonded together\n",
    )?;
    fs::write(
        dir.path().join("dictionary.txt"),
        "erosion\n\tthe wearing away of rock by wind and water\n",
    )?;
    // No format registered for this one: it must be skipped silently.
    fs::write(dir.path().join("README.md"), "not a corpus file\n")?;
    Ok(())
}

fn test_config() -> CorpusConfig {
    let mut config = CorpusConfig::new();
    config
        .register("wiki.txt", CorpusFormat::NameTabText)
        .register("definitions.txt", CorpusFormat::TripleField)
        .register("dictionary.txt", CorpusFormat::HeadwordBlock);
    config
}

#[test]
fn builds_from_mixed_corpus_and_answers_queries() -> Result<()> {
    let corpus_dir = TempDir::new()?;
    let index_dir = TempDir::new()?;
    write_corpus(&corpus_dir)?;

    let engine = SearchEngine::open_or_build(
        index_dir.path().join("store"),
        corpus_dir.path(),
        &test_config(),
    )?;

    // 2 wiki lines + 2 definition lines + 1 dictionary block; README skipped.
    assert_eq!(engine.document_count()?, 5);

    let result = engine.search("light energy sugar", &SearchOptions::default())?;
    assert!(!result.hits.is_empty());
    assert_eq!(result.hits[0].name, "Photosynthesis");
    assert_eq!(result.hits[0].corpus, "wiki.txt");

    let result = engine.search("atoms bonded", &SearchOptions::default())?;
    assert_eq!(result.hits[0].name, "doc1");
    assert_eq!(result.hits[0].corpus, "definitions.txt");

    let result = engine.search("erosion", &SearchOptions::default())?;
    assert_eq!(result.hits[0].name, "erosion");
    assert_eq!(result.hits[0].corpus, "dictionary.txt");

    // Provenance from the skipped file never appears.
    let result = engine.search("corpus file", &SearchOptions::default())?;
    assert!(result.hits.iter().all(|h| h.corpus != "README.md"));
    Ok(())
}

#[test]
fn persisted_index_is_reused_without_rebuilding() -> Result<()> {
    let corpus_dir = TempDir::new()?;
    let index_dir = TempDir::new()?;
    write_corpus(&corpus_dir)?;
    let store_path = index_dir.path().join("store");

    {
        let engine =
            SearchEngine::open_or_build(&store_path, corpus_dir.path(), &test_config())?;
        assert_eq!(engine.document_count()?, 5);
    }

    // Grow the corpus after the first build. The existence check is boolean,
    // so the reopened engine must serve the old snapshot untouched.
    fs::write(
        corpus_dir.path().join("wiki.txt"),
        "Magnetism\tMagnets attract iron\n",
    )?;

    let engine = SearchEngine::open_or_build(&store_path, corpus_dir.path(), &test_config())?;
    assert_eq!(engine.document_count()?, 5);

    let result = engine.search("magnets iron", &SearchOptions::default())?;
    assert!(result.hits.is_empty());

    let result = engine.search("gravity force", &SearchOptions::default())?;
    assert_eq!(result.hits[0].name, "Gravity");
    Ok(())
}

#[test]
fn empty_corpus_directory_builds_an_empty_index() -> Result<()> {
    let corpus_dir = TempDir::new()?;
    let index_dir = TempDir::new()?;

    let engine = SearchEngine::open_or_build(
        index_dir.path().join("store"),
        corpus_dir.path(),
        &CorpusConfig::new(),
    )?;

    let result = engine.search("anything at all", &SearchOptions::default())?;
    assert!(result.hits.is_empty());
    assert_eq!(result.total, 0);
    Ok(())
}

#[test]
fn ranking_is_ordered_and_bounded() -> Result<()> {
    let corpus_dir = TempDir::new()?;
    let index_dir = TempDir::new()?;

    let mut lines = String::new();
    for i in 0..40 {
        // Vary term frequency so scores differ across documents.
        let repeats = (i % 4) + 1;
        let body = "mineral ".repeat(repeats);
        lines.push_str(&format!("rock{i}\t{} formed in layers\n", body.trim_end()));
    }
    fs::write(corpus_dir.path().join("rocks.txt"), lines)?;

    let mut config = CorpusConfig::new();
    config.register("rocks.txt", CorpusFormat::NameTabText);

    let engine =
        SearchEngine::open_or_build(index_dir.path().join("store"), corpus_dir.path(), &config)?;

    let result = engine.search("mineral", &SearchOptions::default())?;
    assert_eq!(result.hits.len(), 20);
    assert_eq!(result.total, 40);
    for pair in result.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    Ok(())
}
