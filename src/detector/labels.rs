//! Label registry parsed from the model's `config.json`.

use std::collections::HashMap;
use std::ops::Index;
use std::path::Path;

use serde::Deserialize;

use super::error::DetectorError;

#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

/// Ordered label names, index-aligned with the model's output channels.
///
/// Built once at detector construction and immutable afterwards. Index `i`
/// names output channel `i`; the alignment with the exported model is a
/// convention the configuration has to preserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    /// Reads a JSON model configuration and builds the label set from its
    /// `id2label` table.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, DetectorError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| {
            DetectorError::ConfigParse(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: ModelConfig = serde_json::from_slice(&raw).map_err(|e| {
            DetectorError::ConfigParse(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Self::from_id2label(&config.id2label)
    }

    /// Builds the label set from an `id2label` mapping of stringified
    /// integer indices to label names.
    ///
    /// Keys are parsed as integers and sorted ascending; the result must be
    /// a contiguous 0-based range, so gaps and duplicate indices (such as
    /// `"0"` next to `"00"`) are rejected.
    pub fn from_id2label(id2label: &HashMap<String, String>) -> Result<Self, DetectorError> {
        if id2label.is_empty() {
            return Err(DetectorError::ConfigParse("id2label mapping is empty".into()));
        }

        let mut entries = Vec::with_capacity(id2label.len());
        for (key, name) in id2label {
            let index: usize = key.parse().map_err(|_| {
                DetectorError::ConfigParse(format!("non-numeric label index: {key:?}"))
            })?;
            entries.push((index, name.clone()));
        }
        entries.sort_by_key(|(index, _)| *index);

        for (position, (index, _)) in entries.iter().enumerate() {
            if *index != position {
                return Err(DetectorError::ConfigParse(format!(
                    "label indices must be contiguous from 0; found index {index} at position {position}"
                )));
            }
        }

        Ok(Self {
            names: entries.into_iter().map(|(_, name)| name).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All label names in output-channel order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Index<usize> for LabelSet {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.names[index]
    }
}
