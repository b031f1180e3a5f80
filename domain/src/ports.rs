//! Seams between the pipelines and the outside world.
//!
//! Concrete handles (model, database, HTTP client) are built once at startup
//! and injected as trait objects, so tests can swap in fakes.

use crate::models::{EmbedPrefix, ParagraphRecord};
use async_trait::async_trait;
use shared::types::Result;

/// Turns text into a fixed-length, L2-normalised vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str, prefix: EmbedPrefix) -> Result<Vec<f32>>;

    /// Length of every vector this embedder produces.
    fn dimension(&self) -> usize;
}

/// Persistence plus ranked nearest-neighbour search over paragraph records.
///
/// The similarity metric and tie-break order belong to the implementation;
/// callers only rely on "most similar first".
pub trait VectorStore: Send + Sync {
    fn insert(&self, record: &ParagraphRecord) -> Result<()>;

    /// Texts of up to `k` stored records, most similar first.
    fn vector_search(&self, query: &[f32], k: usize) -> Result<Vec<String>>;

    fn count(&self) -> Result<usize>;
}

/// A hosted text-generation model taking a single prompt.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
