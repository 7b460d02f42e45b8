use thiserror::Error;

use crate::assets::AssetError;

/// Errors surfaced by detector construction and analysis.
///
/// `Asset`, `ConfigParse` and `ModelLoad` abort construction entirely; no
/// partially initialized detector is ever returned. `InvalidInput` and
/// `Inference` belong to a single `analyze` call and leave the detector
/// usable for subsequent calls.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// A bundled or configured resource could not be materialized
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// The label configuration is malformed or its indices are not a
    /// contiguous 0-based range
    #[error("label config error: {0}")]
    ConfigParse(String),
    /// The tokenizer or the execution engine rejected its input file
    #[error("model load error: {0}")]
    ModelLoad(String),
    /// Unsupported input to `analyze`
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Tokenization or engine failure while scoring one text
    #[error("inference error: {0}")]
    Inference(String),
}

impl From<ort::Error> for DetectorError {
    fn from(err: ort::Error) -> Self {
        DetectorError::ModelLoad(err.to_string())
    }
}
