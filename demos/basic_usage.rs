use corsearch::{SearchEngine, SearchOptions};

fn main() -> anyhow::Result<()> {
    println!("=== corsearch basic usage ===\n");

    // Create a new search engine (in-memory for this example)
    let engine = SearchEngine::in_memory()?;

    println!("Indexing documents...");

    engine.add_document(
        "Photosynthesis",
        "wiki_summary.txt",
        "Photosynthesis is the process by which plants use light energy to produce sugar from carbon dioxide and water.",
    )?;
    engine.add_document(
        "Cellular respiration",
        "wiki_summary.txt",
        "Cellular respiration releases energy stored in glucose to power the cell.",
    )?;
    engine.add_document(
        "gravity",
        "Science_Dictionary_for_Kids_book_filtered.txt",
        "gravity the force that attracts a body toward the center of the earth",
    )?;

    println!("Indexed {} documents\n", engine.document_count()?);

    // Ranked query
    println!("--- Query: 'light energy plants' ---");
    let result = engine.search("light energy plants", &SearchOptions::default())?;
    for (rank, hit) in result.hits.iter().enumerate() {
        println!(
            "{}. [{:.4}] {} ({})",
            rank + 1,
            hit.score,
            hit.name,
            hit.corpus
        );
    }

    // Reserved characters are literal text, not query syntax
    println!("\n--- Query: 'topic:gravity' ---");
    let result = engine.search("topic:gravity", &SearchOptions::default())?;
    for hit in &result.hits {
        println!("[{:.4}] {} ({})", hit.score, hit.name, hit.corpus);
    }

    // Index statistics
    let stats = engine.stats()?;
    println!(
        "\nIndex: {} documents, {} distinct terms, avg doc length {:.1}",
        stats.total_documents, stats.total_terms, stats.avg_doc_length
    );

    Ok(())
}
