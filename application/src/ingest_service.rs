use anyhow::{ensure, Context};
use domain::models::{EmbedPrefix, IngestReport, ParagraphRecord};
use domain::paragraph::split_into_paragraphs;
use domain::ports::{Embedder, VectorStore};
use infrastructure::document_reader::read_document;
use shared::telemetry::Telemetry;
use shared::types::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Reads a document, splits it into paragraphs and stores one embedded
/// record per paragraph.
///
/// Inserts happen one at a time with no transaction: an error midway leaves
/// the earlier paragraphs stored.
pub struct IngestionPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl IngestionPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    pub fn ingest_file(&self, path: &Path) -> Result<IngestReport> {
        info!(path = %path.display(), "Ingesting document");
        let text = read_document(path)?;
        let inserted = self
            .ingest_text(&text)
            .with_context(|| format!("Ingestion of {} stopped", path.display()))?;
        Ok(IngestReport {
            source: path.to_path_buf(),
            inserted,
        })
    }

    /// Returns the number of paragraphs inserted.
    pub fn ingest_text(&self, text: &str) -> Result<usize> {
        let telemetry = Telemetry::new();
        let paragraphs = split_into_paragraphs(text);

        for (index, paragraph) in paragraphs.iter().enumerate() {
            let embedding = self.embedder.embed(paragraph, EmbedPrefix::Passage)?;
            ensure!(
                embedding.len() == self.embedder.dimension(),
                "Embedder returned {} values, expected {}",
                embedding.len(),
                self.embedder.dimension()
            );
            self.store
                .insert(&ParagraphRecord::new(paragraph.as_str(), embedding))
                .with_context(|| format!("Failed to store paragraph {}", index + 1))?;
            debug!(index, "Embedded paragraph");
        }

        info!(
            inserted = paragraphs.len(),
            elapsed_ms = telemetry.elapsed_ms() as u64,
            "Inserted {} paragraphs",
            paragraphs.len()
        );
        Ok(paragraphs.len())
    }
}
