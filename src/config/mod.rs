pub mod error;

use self::error::ConfigError;
use crate::hints::{HintLoader, HintsConfig};
use crate::util::Util;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "weat.json";

/// Settings of the engine, persisted as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaterConfig {
    pub window_size_w: u32,
    pub window_size_h: u32,
    /// Named hint sources, merged in this order.
    pub hint_files: Vec<String>,
    /// Hints given directly in the configuration. They take precedence over
    /// every hint file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<HintsConfig>,
    #[serde(skip_serializing_if = "is_false")]
    pub debug: bool,
    #[serde(skip)]
    path: PathBuf,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Default for EaterConfig {
    fn default() -> Self {
        Self {
            window_size_w: 1280,
            window_size_h: 800,
            hint_files: vec!["default".into()],
            hints: None,
            debug: false,
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }
}

impl EaterConfig {
    /// Read the configuration stored at `path`, or the defaults if there is
    /// no such file. `extra_hint_files` are appended to the configured ones.
    pub fn load(path: &Path, extra_hint_files: &[String]) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(data) => {
                log::info!("Loading configuration from {path:?}");
                serde_json::from_str::<EaterConfig>(&data)?
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::info!("Configuration file {path:?} not found. Using default values.");
                Self::default()
            }
            Err(error) => return Err(error.into()),
        };

        config.validate()?;
        config.path = path.to_path_buf();

        if !extra_hint_files.is_empty() {
            config.hint_files.extend_from_slice(extra_hint_files);
            Util::dedup(&mut config.hint_files);
        }

        Ok(config)
    }

    /// Write the configuration back to where it was loaded from.
    pub fn save(&self) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, json)?;
        log::debug!("Configuration saved to {:?}", self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all configured hint files and merge them on top of the direct
    /// hints.
    pub fn combined_hints(&self, loader: &HintLoader) -> HintsConfig {
        loader.load_combined(&self.hint_files, self.hints.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size_w == 0 || self.window_size_h == 0 {
            return Err(ConfigError::Invalid(
                "Window dimensions must be positive".into(),
            ));
        }

        if self.hint_files.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid("Empty hint file name".into()));
        }

        Ok(())
    }
}

impl fmt::Display for EaterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EaterConfig(window_size_w={}, window_size_h={}, hint_files={:?})",
            self.window_size_w, self.window_size_h, self.hint_files
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{error::ConfigError, EaterConfig};
    use crate::hints::{HintLoader, RemoveHints};
    use std::fs;

    #[test]
    fn missing_file_gives_defaults() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weat.json");

        let config = EaterConfig::load(&path, &[]).unwrap();
        assert_eq!(config.window_size_w, 1280);
        assert_eq!(config.window_size_h, 800);
        assert_eq!(config.hint_files, vec!["default".to_string()]);
        assert!(config.hints.is_none());
        assert!(!config.debug);
        assert_eq!(config.path(), path.as_path());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weat.json");
        fs::write(
            &path,
            r#"{"window_size_w": 1920, "window_size_h": 1080, "hint_files": ["default", "news"], "debug": true}"#,
        )
        .unwrap();

        let config = EaterConfig::load(&path, &["news".into(), "blog".into()]).unwrap();
        assert_eq!(config.window_size_w, 1920);
        assert_eq!(config.window_size_h, 1080);
        assert_eq!(config.hint_files, vec!["default", "news", "blog"]);
        assert!(config.debug);
    }

    #[test]
    fn rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weat.json");

        fs::write(&path, r#"{"window_size_w": 0}"#).unwrap();
        assert!(matches!(
            EaterConfig::load(&path, &[]),
            Err(ConfigError::Invalid(_))
        ));

        fs::write(&path, r#"{"window_size_w": "wide"}"#).unwrap();
        assert!(matches!(
            EaterConfig::load(&path, &[]),
            Err(ConfigError::Parse(_))
        ));

        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            EaterConfig::load(&path, &[]),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn save_skips_defaults_that_are_off() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weat.json");

        let config = EaterConfig::load(&path, &[]).unwrap();
        config.save().unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["window_size_w"], 1280);
        assert!(saved.get("debug").is_none());
        assert!(saved.get("hints").is_none());
        assert!(saved.get("path").is_none());

        let reloaded = EaterConfig::load(&path, &[]).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn direct_hints_come_first() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("site.json"),
            r#"{"remove": {"tags": ["aside", "nav"]}}"#,
        )
        .unwrap();

        let mut config = EaterConfig::default();
        config.hint_files = vec!["site".into(), "missing".into()];
        config.hints = Some(crate::hints::HintsConfig::new(
            Some(RemoveHints {
                tags: vec!["nav".into()],
                ..Default::default()
            }),
            None,
        ));

        let hints = config.combined_hints(&HintLoader::new(Some(dir.path())));
        assert_eq!(hints.remove.unwrap().tags, vec!["nav", "aside"]);
        assert!(hints.main.is_none());
    }

    #[test]
    fn display() {
        assert_eq!(
            EaterConfig::default().to_string(),
            r#"EaterConfig(window_size_w=1280, window_size_h=800, hint_files=["default"])"#
        );
    }
}
