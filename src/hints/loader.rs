use rust_embed::RustEmbed;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::HintError;
use super::HintsConfig;

#[derive(RustEmbed)]
#[folder = "hints"]
struct EmbeddedHintFiles;

/// Resolves hint source names to hint documents.
///
/// A name `foo` refers to `foo.json`, looked up in the user hint directory
/// first and in the hint files embedded into the crate second.
#[derive(Clone, Debug, Default)]
pub struct HintLoader {
    directory: Option<PathBuf>,
}

impl HintLoader {
    pub fn new(directory: Option<&Path>) -> Self {
        Self {
            directory: directory.map(Path::to_path_buf),
        }
    }

    /// Load a single hint source. Never fails: a missing or malformed source
    /// is logged and yields empty hints.
    pub fn load(&self, name: &str) -> HintsConfig {
        match self.read(name) {
            Ok(hints) => {
                log::debug!("Loaded hints '{name}': {hints}");
                hints
            }
            Err(HintError::NotFound(_)) => {
                log::warn!("Hints file '{name}' not found. Using empty hints.");
                HintsConfig::default()
            }
            Err(error) => {
                log::error!("Failed to load hints from '{name}': {error}");
                HintsConfig::default()
            }
        }
    }

    /// Load every named source independently and merge them, in order, on
    /// top of `direct`.
    pub fn load_combined<S: AsRef<str>>(
        &self,
        names: &[S],
        direct: Option<HintsConfig>,
    ) -> HintsConfig {
        let loaded = names.iter().map(|name| self.load(name.as_ref()));
        let combined = HintsConfig::merge(direct, loaded);
        log::debug!("Combined hints loaded: {combined}");
        combined
    }

    /// Names of the hint sources embedded into the crate.
    pub fn embedded_names() -> Vec<String> {
        EmbeddedHintFiles::iter()
            .filter_map(|file_name| {
                file_name
                    .strip_suffix(".json")
                    .map(|name| name.to_owned())
            })
            .collect()
    }

    pub fn parse_data(data: &[u8]) -> Result<HintsConfig, HintError> {
        let text = std::str::from_utf8(data)?;
        Ok(serde_json::from_str(text)?)
    }

    fn read(&self, name: &str) -> Result<HintsConfig, HintError> {
        let file_name = format!("{name}.json");

        if let Some(directory) = &self.directory {
            let path = directory.join(&file_name);
            match fs::read(&path) {
                Ok(data) => return Self::parse_data(&data),
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    log::debug!("No user hints at {path:?}, trying embedded hints");
                }
                Err(error) => return Err(error.into()),
            }
        }

        let file = EmbeddedHintFiles::get(&file_name)
            .ok_or_else(|| HintError::NotFound(name.to_owned()))?;
        Self::parse_data(&file.data)
    }
}
