use crate::pooling::pool_and_normalize;
use anyhow::{anyhow, Context};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XlmRobertaConfig, XLMRobertaModel};
use domain::models::EmbedPrefix;
use domain::ports::Embedder;
use serde::Deserialize;
use shared::types::Result;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

// XLM-RoBERTa reserves the first two position ids for padding.
const POSITION_OFFSET: usize = 2;

#[derive(Deserialize)]
struct EncoderShape {
    hidden_size: usize,
    max_position_embeddings: usize,
}

/// Local `intfloat/multilingual-e5-base` encoder running on the CPU.
///
/// The model directory must contain `config.json`, `tokenizer.json` and
/// `model.safetensors`.
pub struct E5Embedder {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl E5Embedder {
    pub fn load(model_dir: &Path, max_tokens: usize) -> Result<Self> {
        info!(model_dir = %model_dir.display(), "Loading embedding model");
        let device = Device::Cpu;

        let config_path = model_dir.join("config.json");
        let raw_config = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: XlmRobertaConfig = serde_json::from_str(&raw_config)
            .with_context(|| format!("Invalid model config {}", config_path.display()))?;
        let shape: EncoderShape = serde_json::from_str(&raw_config)?;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load {}: {}", tokenizer_path.display(), e))?;
        let max_length = max_tokens.min(shape.max_position_embeddings.saturating_sub(POSITION_OFFSET));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;
        tokenizer.with_padding(None);

        let weights_path = model_dir.join("model.safetensors");
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)
                .with_context(|| format!("Failed to map {}", weights_path.display()))?
        };
        // Checkpoints exported from a task head nest the encoder under `roberta`.
        let vb = if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            vb.pp("roberta")
        } else {
            vb
        };
        let model = XLMRobertaModel::new(&config, vb)?;

        info!(
            dimension = shape.hidden_size,
            max_length, "Embedding model ready"
        );
        Ok(Self {
            model,
            tokenizer,
            device,
            dimension: shape.hidden_size,
        })
    }

    fn encode(&self, input: &str) -> Result<(Tensor, Tensor, Tensor)> {
        let encoding = self
            .tokenizer
            .encode(input, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        let ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let type_ids = ids.zeros_like()?;
        debug!(tokens = encoding.len(), "Encoded input");
        Ok((ids, mask, type_ids))
    }
}

impl Embedder for E5Embedder {
    fn embed(&self, text: &str, prefix: EmbedPrefix) -> Result<Vec<f32>> {
        let input = prefix.apply(text);
        let (ids, mask, type_ids) = self.encode(&input)?;
        let hidden_states = self
            .model
            .forward(&ids, &mask, &type_ids, None, None, None)?;
        pool_and_normalize(&hidden_states, &mask)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
