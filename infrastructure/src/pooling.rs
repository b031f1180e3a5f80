//! Sentence pooling over encoder output.

use candle_core::Tensor;
use shared::types::Result;

/// Floor for the unmasked-token count, so an all-padding row stays finite.
const MASK_COUNT_FLOOR: f64 = 1e-9;
/// Floor for the vector norm during L2 normalisation.
const NORM_FLOOR: f64 = 1e-12;

/// Masked mean pooling: `[batch, seq, hidden]` with `[batch, seq]` mask to
/// `[batch, hidden]`. Padding positions (mask 0) contribute nothing.
pub fn masked_mean_pool(hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let mask = attention_mask
        .to_dtype(hidden_states.dtype())?
        .unsqueeze(2)?;
    let summed = hidden_states.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?.maximum(MASK_COUNT_FLOOR)?;
    Ok(summed.broadcast_div(&counts)?)
}

/// Scale each row of `[batch, hidden]` to unit Euclidean norm.
pub fn l2_normalize(pooled: &Tensor) -> Result<Tensor> {
    let norms = pooled.sqr()?.sum_keepdim(1)?.sqrt()?.maximum(NORM_FLOOR)?;
    Ok(pooled.broadcast_div(&norms)?)
}

pub fn pool_and_normalize(hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Vec<f32>> {
    let pooled = masked_mean_pool(hidden_states, attention_mask)?;
    let normalized = l2_normalize(&pooled)?;
    Ok(normalized.get(0)?.to_vec1::<f32>()?)
}
