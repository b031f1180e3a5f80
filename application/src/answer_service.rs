use domain::ports::LlmClient;
use shared::types::Result;
use shared::utils::strip_code_fences;
use std::sync::Arc;

/// Single-turn prompt grounding the model in retrieved paragraphs.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!(
        "You are a helpful assistant for farmers. Answer the user's question based on query and context.\n\
         Context: {context}\n\
         User Query: {query}\n\
         JUST give answer to the user query, do not include any other information.\n"
    )
}

pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn answer(&self, context: &str, query: &str) -> Result<String> {
        let raw = self.llm.generate(&build_prompt(context, query)).await?;
        Ok(strip_code_fences(&raw))
    }
}
