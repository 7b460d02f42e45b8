//! Text-to-token encoding via the HuggingFace tokenizer.

use tokenizers::Tokenizer;

use super::error::DetectorError;

/// Token ids and attention mask for one text, batch dimension of 1 implied.
///
/// Both sequences always have the same length. Values are widened to i64
/// because that is the element type the model graph takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInput {
    pub ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
}

impl EncodedInput {
    /// Sequence length L of the encoded text.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Encodes `text` with the model's tokenizer, special tokens included.
///
/// Truncation and padding are whatever the tokenizer file configures;
/// nothing is capped here. Empty text is valid as long as the tokenizer
/// still emits at least one token for it.
pub(crate) fn encode(tokenizer: &Tokenizer, text: &str) -> Result<EncodedInput, DetectorError> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| DetectorError::Inference(format!("tokenization failed: {e}")))?;

    let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| i64::from(m))
        .collect();

    if ids.is_empty() {
        return Err(DetectorError::InvalidInput(
            "tokenizer produced an empty encoding; cannot build a [1, 0] input tensor".into(),
        ));
    }
    if ids.len() != attention_mask.len() {
        return Err(DetectorError::Inference(format!(
            "tokenizer returned {} ids but {} attention-mask values",
            ids.len(),
            attention_mask.len()
        )));
    }

    Ok(EncodedInput {
        ids,
        attention_mask,
    })
}
