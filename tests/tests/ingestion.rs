use application::ingest_service::IngestionPipeline;
use domain::models::EmbedPrefix;
use domain::ports::VectorStore;
use infrastructure::embedding_storage::ParagraphStore;
use std::io::Write;
use std::sync::Arc;
use tests::{FlakyStore, HashEmbedder};

fn pipeline() -> (IngestionPipeline, Arc<HashEmbedder>, Arc<ParagraphStore>) {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(ParagraphStore::in_memory().unwrap());
    (
        IngestionPipeline::new(embedder.clone(), store.clone()),
        embedder,
        store,
    )
}

#[test]
fn test_inserts_one_record_per_paragraph() {
    let (pipeline, embedder, store) = pipeline();
    let doc = "Rice needs water.\n\nRice grows in warm climates.\n\n\n  Harvest after 120 days.  \n";

    assert_eq!(pipeline.ingest_text(doc).unwrap(), 3);
    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(
        store
            .all_records()
            .unwrap()
            .into_iter()
            .map(|r| r.text)
            .collect::<Vec<_>>(),
        vec![
            "Rice needs water.",
            "Rice grows in warm climates.",
            "Harvest after 120 days."
        ]
    );
    assert!(embedder.prefixes().iter().all(|p| *p == EmbedPrefix::Passage));
}

#[test]
fn test_empty_document_inserts_nothing() {
    let (pipeline, embedder, store) = pipeline();
    assert_eq!(pipeline.ingest_text("").unwrap(), 0);
    assert_eq!(pipeline.ingest_text(" \n\n\t\n").unwrap(), 0);
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(embedder.call_count(), 0);
}

#[test]
fn test_ingest_file_reports_count() {
    let (pipeline, _, store) = pipeline();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "ধান একটি প্রধান ফসল।\n\nবোরো ধান শীতকালে চাষ হয়।").unwrap();

    let report = pipeline.ingest_file(file.path()).unwrap();
    assert_eq!(report.inserted, 2);
    assert_eq!(report.source, file.path());
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_repeated_ingestion_duplicates_records() {
    let (pipeline, _, store) = pipeline();
    pipeline.ingest_text("one\n\ntwo").unwrap();
    pipeline.ingest_text("one\n\ntwo").unwrap();
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn test_failure_midway_keeps_earlier_inserts() {
    let embedder = Arc::new(HashEmbedder::new());
    let store = Arc::new(FlakyStore::failing_after(2));
    let pipeline = IngestionPipeline::new(embedder, store.clone());

    let err = pipeline.ingest_text("a\n\nb\n\nc\n\nd").unwrap_err();
    assert!(format!("{err:#}").contains("database connection lost"));
    assert_eq!(store.kept_texts(), vec!["a", "b"]);
}

#[test]
fn test_missing_file_is_an_error() {
    let (pipeline, _, store) = pipeline();
    assert!(pipeline
        .ingest_file(std::path::Path::new("/no/such/rice.txt"))
        .is_err());
    assert_eq!(store.count().unwrap(), 0);
}
