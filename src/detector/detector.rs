use std::sync::Arc;

use log::debug;
use ort::session::Session;
use tokenizers::Tokenizer;

use super::builder::DetectorBuilder;
use super::encoding;
use super::error::DetectorError;
use super::inference;
use super::labels::LabelSet;
use super::score::{self, ToxicityScore};
use super::DetectorInfo;
use crate::assets::AssetProvisioner;

/// A thread-safe toxicity detector over a quantized ONNX model.
///
/// The long-lived handles (tokenizer, execution session, label registry and
/// the extracted asset files) are created at construction and read-only
/// afterwards; per-call tensors are scoped to each [`analyze`] call. The
/// type is `Send + Sync` because every field is behind `Arc` or owned
/// immutably, so one instance can serve concurrent callers.
///
/// [`analyze`]: ToxicityDetector::analyze
#[derive(Debug)]
pub struct ToxicityDetector {
    pub(crate) model_path: String,
    pub(crate) tokenizer_path: String,
    pub(crate) tokenizer: Arc<Tokenizer>,
    pub(crate) session: Arc<Session>,
    pub(crate) labels: Arc<LabelSet>,
    /// Keeps extracted bundled assets alive until the detector is dropped.
    pub(crate) assets: Option<AssetProvisioner>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ToxicityDetector>();
    }
};

impl ToxicityDetector {
    /// Builds a detector from the bundled model, tokenizer and label
    /// configuration.
    ///
    /// All one-time loading happens here and fails fast; on error no usable
    /// instance is returned.
    pub fn new() -> Result<Self, DetectorError> {
        Self::builder().build()
    }

    /// Creates a builder for custom model paths or runtime tuning.
    pub fn builder() -> DetectorBuilder {
        DetectorBuilder::new()
    }

    /// Returns information about the detector's model and labels.
    pub fn info(&self) -> DetectorInfo {
        DetectorInfo {
            model_path: self.model_path.clone(),
            tokenizer_path: self.tokenizer_path.clone(),
            num_labels: self.labels.len(),
            labels: self.labels.names().to_vec(),
        }
    }

    /// Scores `text` against every label the model was trained on.
    ///
    /// Synchronous and retry-free: the text is encoded, one forward pass
    /// runs, and each output logit becomes a probability via the logistic
    /// sigmoid, keyed by its label. Tokenization or engine failures surface
    /// as errors for this call only; the detector stays usable.
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # use toxdetect::ToxicityDetector;
    /// let detector = ToxicityDetector::new()?;
    /// let score = detector.analyze("what a lovely day")?;
    /// assert_eq!(score.message(), "what a lovely day");
    /// # Ok(())
    /// # }
    /// ```
    pub fn analyze(&self, text: &str) -> Result<ToxicityScore, DetectorError> {
        let encoded = encoding::encode(&self.tokenizer, text)?;
        debug!(
            "encoded {} chars into {} tokens",
            text.len(),
            encoded.len()
        );
        let logits = inference::run(&self.session, &encoded)?;
        Ok(score::compose(text, &logits, &self.labels))
    }
}
