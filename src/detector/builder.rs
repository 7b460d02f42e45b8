use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use ort::session::Session;
use tokenizers::Tokenizer;

use super::detector::ToxicityDetector;
use super::error::DetectorError;
use super::labels::LabelSet;
use crate::assets::{AssetError, AssetProvisioner, CONFIG_ASSET, MODEL_ASSET, TOKENIZER_ASSET};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Where the model, tokenizer and label configuration come from.
#[derive(Debug, Clone, Default)]
enum ModelSource {
    /// Assets compiled into the binary, extracted to temp files at build.
    #[default]
    Bundled,
    /// Files already on the filesystem.
    Custom {
        model: PathBuf,
        tokenizer: PathBuf,
        config: PathBuf,
    },
}

/// Fluent construction of a [`ToxicityDetector`].
///
/// Nothing is loaded until [`build`](DetectorBuilder::build); the builder
/// only records the model source and runtime tuning, and the last setter
/// call wins.
///
/// # Example
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use toxdetect::{RuntimeConfig, ToxicityDetector};
///
/// let detector = ToxicityDetector::builder()
///     .with_runtime_config(RuntimeConfig::default())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DetectorBuilder {
    source: ModelSource,
    runtime_config: RuntimeConfig,
}

impl DetectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the execution engine's thread and optimization settings.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Uses a model, tokenizer and label configuration already on disk
    /// instead of the bundled assets.
    pub fn with_custom_model(
        mut self,
        model_path: impl Into<PathBuf>,
        tokenizer_path: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        self.source = ModelSource::Custom {
            model: model_path.into(),
            tokenizer: tokenizer_path.into(),
            config: config_path.into(),
        };
        self
    }

    /// Performs all one-time loading and returns the finished detector.
    ///
    /// Any failure (missing asset, malformed label configuration, rejected
    /// model or tokenizer) aborts construction; no partially initialized
    /// detector escapes.
    pub fn build(self) -> Result<ToxicityDetector, DetectorError> {
        let (model_path, tokenizer_path, config_path, assets) = match self.source {
            ModelSource::Bundled => {
                let mut assets = AssetProvisioner::new();
                let model = assets.provision(MODEL_ASSET)?;
                let tokenizer = assets.provision(TOKENIZER_ASSET)?;
                let config = assets.provision(CONFIG_ASSET)?;
                (model, tokenizer, config, Some(assets))
            }
            ModelSource::Custom {
                model,
                tokenizer,
                config,
            } => {
                for path in [&model, &tokenizer, &config] {
                    if !path.exists() {
                        return Err(AssetError::NotFound(path.display().to_string()).into());
                    }
                }
                (model, tokenizer, config, None)
            }
        };

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| DetectorError::ModelLoad(format!("failed to load tokenizer: {e}")))?;
        info!("tokenizer loaded from {}", tokenizer_path.display());

        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(&model_path)?;
        Self::validate_model(&session)?;
        info!("model loaded from {}", model_path.display());

        let labels = LabelSet::from_config_file(&config_path)?;
        info!("label registry loaded with {} labels", labels.len());

        Ok(ToxicityDetector {
            model_path: model_path.display().to_string(),
            tokenizer_path: tokenizer_path.display().to_string(),
            tokenizer: Arc::new(tokenizer),
            session: Arc::new(session),
            labels: Arc::new(labels),
            assets,
        })
    }

    /// Checks that the loaded graph exposes the expected input/output arity.
    fn validate_model(session: &Session) -> Result<(), DetectorError> {
        let inputs = &session.inputs;
        if inputs.len() < 2 {
            return Err(DetectorError::ModelLoad(format!(
                "model must take input_ids and attention_mask, found {} inputs",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(DetectorError::ModelLoad(
                "model must expose a logits output".to_string(),
            ));
        }

        Ok(())
    }
}
