use std::{error::Error, sync::Arc};

use docent_core::{Document, Metadata};
use docent_vectordb::{HashEmbedder, InMemoryVectorDb, SearchType, VectorDb};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let db = InMemoryVectorDb::builder()
        .collection("notes")
        .embedder(Arc::new(HashEmbedder::new(64)))
        .search_type(SearchType::Hybrid)
        .build()?;
    db.create().await?;

    let docs: Vec<Document> = [
        "Rust is fast and memory efficient.",
        "Ownership rules keep memory safe.",
        "Bread needs time to rise.",
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, content)| Document::new(content).with_id(format!("doc-{idx}")))
    .collect();

    let mut filters = Metadata::new();
    filters.insert("source".to_string(), "example".into());
    db.insert(&docs, Some(&filters)).await?;

    let results = db.search("memory", 3, None).await?;
    println!("Retrieved {} docs", results.len());
    for doc in results {
        println!(
            "score={:.3} json={}",
            doc.reranking_score.unwrap_or_default(),
            doc.to_json()?
        );
    }
    Ok(())
}
