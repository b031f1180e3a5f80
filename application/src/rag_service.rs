use crate::answer_service::AnswerGenerator;
use crate::retrieval_service::Retriever;
use shared::types::Result;
use tracing::info;

/// One question turn: retrieve context, then ask the model.
pub struct RagService {
    retriever: Retriever,
    generator: AnswerGenerator,
    top_k: usize,
}

impl RagService {
    pub fn new(retriever: Retriever, generator: AnswerGenerator, top_k: usize) -> Self {
        Self {
            retriever,
            generator,
            top_k,
        }
    }

    pub async fn query(&self, question: &str) -> Result<String> {
        let paragraphs = self.retriever.retrieve(question, self.top_k)?;
        info!(paragraphs = paragraphs.len(), "Context retrieved");
        let context = paragraphs.join("\n");
        self.generator.answer(&context, question).await
    }
}
