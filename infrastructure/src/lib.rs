pub mod config;
pub mod document_reader;
pub mod embedder;
pub mod embedding_storage;
pub mod gemini_client;
pub mod pooling;
pub mod search;
