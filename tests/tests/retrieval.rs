use application::ingest_service::IngestionPipeline;
use application::retrieval_service::{Retriever, DEFAULT_TOP_K};
use domain::models::EmbedPrefix;
use infrastructure::embedding_storage::ParagraphStore;
use std::sync::Arc;
use tests::HashEmbedder;

const DOC: &str = "Rice needs water.\n\n\
Rice grows in warm climates.\n\n\
Transplant seedlings after 25 days.\n\n\
Apply urea in three split doses.\n\n\
Drain the field before harvest.\n\n\
Stem borers attack young tillers.\n\n\
Store grain below 14 percent moisture.";

fn seeded() -> (Retriever, Arc<HashEmbedder>) {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(ParagraphStore::in_memory().unwrap());
    IngestionPipeline::new(embedder.clone(), store.clone())
        .ingest_text(DOC)
        .unwrap();
    (Retriever::new(embedder.clone(), store), embedder)
}

#[test]
fn test_result_never_exceeds_k() {
    let (retriever, _) = seeded();
    for k in 0..10 {
        let hits = retriever.retrieve("when should rice be harvested", k).unwrap();
        assert_eq!(hits.len(), k.min(7));
    }
}

#[test]
fn test_default_k_is_five() {
    let (retriever, _) = seeded();
    assert_eq!(DEFAULT_TOP_K, 5);
    assert_eq!(retriever.retrieve("rice", DEFAULT_TOP_K).unwrap().len(), 5);
}

#[test]
fn test_exact_paragraph_ranks_first() {
    let (retriever, _) = seeded();
    let hits = retriever.retrieve("Rice grows in warm climates.", 3).unwrap();
    assert_eq!(hits[0], "Rice grows in warm climates.");
}

#[test]
fn test_query_uses_query_prefix() {
    let (retriever, embedder) = seeded();
    let before = embedder.call_count();
    retriever.retrieve("fertilizer schedule", 2).unwrap();

    assert_eq!(embedder.call_count(), before + 1);
    assert_eq!(embedder.prefixes().last(), Some(&EmbedPrefix::Query));
    assert_eq!(embedder.texts().last().unwrap(), "fertilizer schedule");
}

#[test]
fn test_empty_store_returns_nothing() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(ParagraphStore::in_memory().unwrap());
    let retriever = Retriever::new(embedder, store);
    assert!(retriever.retrieve("anything", 5).unwrap().is_empty());
}
