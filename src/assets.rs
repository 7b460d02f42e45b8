//! Extraction of bundled model assets into process-lifetime temp files.
//!
//! The model weights, tokenizer definition and label configuration are
//! compiled into the binary from the `assets/` directory. The tokenizer and
//! the execution engine both load from filesystem paths, so each asset is
//! materialized as a temp file once at detector construction and kept until
//! the provisioner is dropped.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rust_embed::RustEmbed;
use sha2::{Digest, Sha256};
use tempfile::TempPath;
use thiserror::Error;

/// Quantized ONNX model weights.
pub const MODEL_ASSET: &str = "model_quantized.onnx";
/// Serialized tokenizer definition.
pub const TOKENIZER_ASSET: &str = "tokenizer.json";
/// Model configuration carrying the `id2label` table.
pub const CONFIG_ASSET: &str = "config.json";

#[derive(RustEmbed)]
#[folder = "assets/"]
#[exclude = "*.md"]
struct BundledAssets;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to extract asset {name}: {source}")]
    Extraction {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("extracted asset {name} does not match bundled bytes (expected sha256 {expected}, got {actual})")]
    DigestMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Materializes bundled assets as readable temp files.
///
/// Extracted files live as long as the provisioner; dropping it removes them
/// (best-effort on abnormal termination, as with any temp file).
#[derive(Default)]
pub struct AssetProvisioner {
    extracted: Vec<TempPath>,
}

impl AssetProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `name` among the bundled assets and writes it to a fresh
    /// temp file, returning the file's path. The written file is verified
    /// byte-identical to the bundled source before the path is handed out.
    pub fn provision(&mut self, name: &str) -> Result<PathBuf, AssetError> {
        let asset =
            BundledAssets::get(name).ok_or_else(|| AssetError::NotFound(name.to_string()))?;

        let (stem, suffix) = split_asset_name(name);
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{stem}_"))
            .suffix(&suffix)
            .tempfile()
            .map_err(|source| AssetError::Extraction {
                name: name.to_string(),
                source,
            })?;
        file.write_all(&asset.data)
            .map_err(|source| AssetError::Extraction {
                name: name.to_string(),
                source,
            })?;
        file.as_file()
            .sync_all()
            .map_err(|source| AssetError::Extraction {
                name: name.to_string(),
                source,
            })?;

        let path = file.into_temp_path();
        verify_extraction(name, &asset.data, &path)?;
        info!("extracted asset {} to {}", name, path.display());

        let location = path.to_path_buf();
        self.extracted.push(path);
        Ok(location)
    }
}

impl fmt::Debug for AssetProvisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<_> = self
            .extracted
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        f.debug_struct("AssetProvisioner")
            .field("extracted", &paths)
            .finish()
    }
}

fn verify_extraction(name: &str, bundled: &[u8], path: &Path) -> Result<(), AssetError> {
    let written = std::fs::read(path).map_err(|source| AssetError::Extraction {
        name: name.to_string(),
        source,
    })?;
    let expected = sha256_hex(bundled);
    let actual = sha256_hex(&written);
    if expected != actual {
        return Err(AssetError::DigestMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    debug!("asset {} verified (sha256 {})", name, actual);
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Splits an asset name into a temp-file prefix stem and a dotted suffix, so
/// `model_quantized.onnx` extracts as `model_quantized_*.onnx`.
fn split_asset_name(name: &str) -> (String, String) {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();
    let suffix = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    (stem, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_is_not_found() {
        let mut provisioner = AssetProvisioner::new();
        match provisioner.provision("definitely_not_bundled.bin") {
            Err(AssetError::NotFound(name)) => assert_eq!(name, "definitely_not_bundled.bin"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn asset_names_split_into_stem_and_suffix() {
        assert_eq!(
            split_asset_name("model_quantized.onnx"),
            ("model_quantized".to_string(), ".onnx".to_string())
        );
        assert_eq!(
            split_asset_name("tokenizer.json"),
            ("tokenizer".to_string(), ".json".to_string())
        );
        assert_eq!(
            split_asset_name("no_extension"),
            ("no_extension".to_string(), String::new())
        );
    }

    #[test]
    fn digests_are_stable() {
        assert_eq!(sha256_hex(b"abc"), sha256_hex(b"abc"));
        assert_ne!(sha256_hex(b"abc"), sha256_hex(b"abd"));
    }
}
