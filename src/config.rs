//! Configuration loading
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Config file (`--config`, `PHRASAL_CONFIG_PATH`, or `phrasal.toml` in the working directory)
//! 3. `PHRASAL_*` environment variables
//! 4. Explicit builder overrides (CLI flags)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::localization::DEFAULT_LANGUAGE;

const DEFAULT_CONFIG_FILE: &str = "phrasal";
const ENV_PREFIX: &str = "PHRASAL";
const CONFIG_PATH_ENV: &str = "PHRASAL_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Language of the message catalog
    #[serde(default = "default_language")]
    pub language: String,

    /// Vocabulary file (TOML tables). Queries print a placeholder without one.
    #[serde(default)]
    pub vocabulary: Option<PathBuf>,

    /// Seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            vocabulary: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load from the default sources with no overrides
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    vocabulary: Option<PathBuf>,
    language: Option<String>,
    seed: Option<u64>,
}

impl ConfigBuilder {
    /// Config file path (overrides default search)
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn vocabulary(mut self, path: Option<PathBuf>) -> Self {
        self.vocabulary = path;
        self
    }

    pub fn language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<Config> {
        let explicit_path = self
            .config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let file = match &explicit_path {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .set_default("language", DEFAULT_LANGUAGE)?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .set_override_option(
                "vocabulary",
                self.vocabulary.map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("language", self.language)?
            .set_override_option("seed", self.seed)?
            .build()
            .with_context(|| match &explicit_path {
                Some(path) => format!("Failed to read config file {}", path.display()),
                None => "Failed to read configuration".to_string(),
            })?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("phrasal-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_file_values_are_loaded() {
        let path = write_temp("language = \"fr-FR\"\nvocabulary = \"words.toml\"\nseed = 42\n");
        let config = Config::builder().config_path(Some(path.clone())).build().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.vocabulary, Some(PathBuf::from("words.toml")));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_overrides_beat_file() {
        let path = write_temp("language = \"fr-FR\"\nseed = 1\n");
        let config = Config::builder()
            .config_path(Some(path.clone()))
            .language(Some("en-US".into()))
            .seed(Some(9))
            .build()
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.language, "en-US");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.vocabulary, None);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let missing = std::env::temp_dir().join("phrasal-does-not-exist.toml");
        assert!(Config::builder().config_path(Some(missing)).build().is_err());
    }
}
