use anyhow::bail;
use domain::models::ParagraphRecord;
use shared::types::Result;

pub struct SearchEngine;

impl SearchEngine {
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot_product / (norm_a * norm_b)
    }

    /// Texts of the `top_k` records most similar to `query_embedding`.
    ///
    /// The sort is stable, so equal scores keep insertion order.
    pub fn find_relevant_paragraphs(
        query_embedding: &[f32],
        records: &[ParagraphRecord],
        top_k: usize,
    ) -> Result<Vec<String>> {
        if let Some(bad) = records
            .iter()
            .find(|r| r.dimension() != query_embedding.len())
        {
            bail!(
                "Embedding dimension mismatch: query has {}, stored record has {}",
                query_embedding.len(),
                bad.dimension()
            );
        }

        let mut similarities: Vec<(f32, &str)> = records
            .iter()
            .map(|record| {
                (
                    Self::cosine_similarity(query_embedding, &record.embedding),
                    &record.text[..],
                )
            })
            .collect();

        similarities.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(similarities
            .into_iter()
            .take(top_k)
            .map(|(_, text)| text.to_string())
            .collect())
    }
}
