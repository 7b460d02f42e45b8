mod builder;
mod detector;
mod encoding;
mod error;
mod inference;
mod labels;
mod score;
mod utils;

pub use builder::DetectorBuilder;
pub use detector::ToxicityDetector;
pub use encoding::EncodedInput;
pub use error::DetectorError;
pub use labels::LabelSet;
pub use score::ToxicityScore;

/// Information about the current state and configuration of a detector
#[derive(Debug, Clone)]
pub struct DetectorInfo {
    /// Path the ONNX model was loaded from
    pub model_path: String,
    /// Path the tokenizer was loaded from
    pub tokenizer_path: String,
    /// Number of labels the model scores
    pub num_labels: usize,
    /// Label names in model output-channel order
    pub labels: Vec<String>,
}
