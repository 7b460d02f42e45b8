//! Text toxicity scoring over a quantized ONNX model.
//!
//! One detector instance holds the tokenizer, the execution session and the
//! label registry for the bundled model. Each [`ToxicityDetector::analyze`]
//! call encodes the text, runs a single forward pass and returns an immutable
//! [`ToxicityScore`] mapping every label to a probability.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use toxdetect::ToxicityDetector;
//!
//! let detector = ToxicityDetector::new()?;
//! let score = detector.analyze("You write terrible code and you know it.")?;
//!
//! if let Some(toxicity) = score.toxicity() {
//!     println!("toxicity: {:.3}", toxicity);
//! }
//! for (label, probability) in score.scores() {
//!     println!("{}: {:.3}", label, probability);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The detector is read-only after construction and can be shared across
//! threads using `Arc`:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use toxdetect::ToxicityDetector;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let detector = Arc::new(ToxicityDetector::new()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let detector = Arc::clone(&detector);
//!     handles.push(thread::spawn(move || {
//!         detector.analyze("test text").unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod detector;
mod runtime;

pub use assets::{AssetError, AssetProvisioner, CONFIG_ASSET, MODEL_ASSET, TOKENIZER_ASSET};
pub use detector::{
    DetectorBuilder, DetectorError, DetectorInfo, EncodedInput, LabelSet, ToxicityDetector,
    ToxicityScore,
};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
