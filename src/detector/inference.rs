//! Forward-pass execution over the loaded ONNX session.

use std::collections::HashMap;

use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use super::encoding::EncodedInput;
use super::error::DetectorError;

/// Runs one forward pass and returns the raw logits of the single batch row.
///
/// Builds the two named `[1, L]` i64 tensors the graph expects. The input
/// and output tensors are scoped to this call and released on every exit
/// path; only the session outlives it.
pub(crate) fn run(session: &Session, input: &EncodedInput) -> Result<Vec<f32>, DetectorError> {
    let shape = (1, input.len());

    let ids_array = Array2::from_shape_vec(shape, input.ids.clone())
        .map_err(|e| DetectorError::Inference(format!("failed to build input_ids array: {e}")))?;
    let ids_dyn = ids_array.into_dyn();
    let input_ids = ids_dyn.as_standard_layout();

    let mask_array = Array2::from_shape_vec(shape, input.attention_mask.clone()).map_err(|e| {
        DetectorError::Inference(format!("failed to build attention_mask array: {e}"))
    })?;
    let mask_dyn = mask_array.into_dyn();
    let attention_mask = mask_dyn.as_standard_layout();

    let mut input_tensors = HashMap::new();
    input_tensors.insert(
        "input_ids",
        Tensor::from_array(&input_ids).map_err(|e| {
            DetectorError::Inference(format!("failed to create input_ids tensor: {e}"))
        })?,
    );
    input_tensors.insert(
        "attention_mask",
        Tensor::from_array(&attention_mask).map_err(|e| {
            DetectorError::Inference(format!("failed to create attention_mask tensor: {e}"))
        })?,
    );

    let outputs = session
        .run(input_tensors)
        .map_err(|e| DetectorError::Inference(format!("failed to run model: {e}")))?;
    let logits = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| DetectorError::Inference(format!("failed to extract logits tensor: {e}")))?;

    if logits.ndim() != 2 {
        return Err(DetectorError::Inference(format!(
            "expected logits of shape [1, N], got {:?}",
            logits.shape()
        )));
    }

    Ok(logits.slice(ndarray::s![0, ..]).iter().copied().collect())
}
