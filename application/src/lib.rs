pub mod answer_service;
pub mod ingest_service;
pub mod rag_service;
pub mod retrieval_service;
