use docent::prelude::*;

#[test]
fn prelude_exposes_document_codec() {
    let doc = Document::from_json(r#"{"content":"x","name":"n"}"#).unwrap();
    assert_eq!(doc.name.as_deref(), Some("n"));
    assert!(matches!(
        Document::from_json("[]"),
        Err(DocumentError::Decode(_))
    ));
}

#[cfg(feature = "knowledge")]
#[tokio::test]
async fn knowledge_base_loads_into_vector_db() {
    use docent::knowledge::{DocumentKnowledgeBase, LoadOptions};
    use docent::vectordb::{InMemoryVectorDb, VectorDb};

    let db = InMemoryVectorDb::builder().build().unwrap();
    let kb = DocumentKnowledgeBase::new(vec![
        Document::new("rust ownership rules"),
        Document::new("gardening tips"),
    ]);
    kb.load(&db, LoadOptions::default()).await.unwrap();

    let results = db.search("ownership", 5, None).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].content, "rust ownership rules");
    assert_eq!(results[0].reranking_score, Some(1.0));
}

#[cfg(feature = "memory")]
#[test]
fn memory_records_are_reexported() {
    use docent::memory::{Memory, MemoryRetrieval};

    let memories = vec![Memory::new("a"), Memory::new("b")];
    let last = MemoryRetrieval::LastN.select(&memories, 1).unwrap();
    assert_eq!(last[0].memory, "b");
}
