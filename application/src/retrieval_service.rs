use domain::models::EmbedPrefix;
use domain::ports::{Embedder, VectorStore};
use shared::types::Result;
use std::sync::Arc;
use tracing::debug;

pub use infrastructure::config::DEFAULT_TOP_K;

pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Up to `k` paragraph texts, in the order the store ranks them.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        let query_vector = self.embedder.embed(query, EmbedPrefix::Query)?;
        let mut hits = self.store.vector_search(&query_vector, k)?;
        hits.truncate(k);
        debug!(k, hits = hits.len(), "Retrieved paragraphs");
        Ok(hits)
    }
}
