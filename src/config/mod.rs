//! Configuration management.
//!
//! Values come from, in increasing priority: built-in defaults and the
//! `GEMINI_API_KEY`/`API_KEY` variables, a TOML file, then
//! `JOURNAL_ANALYZER_*` environment overrides (`__` separates sections, e.g.
//! `JOURNAL_ANALYZER_API__MODEL=gemini-2.5-pro`).

pub mod file_config;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::analyzer::PromptLanguage;
use crate::models::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::utils::{validate_url, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

pub use file_config::{ConfigFile, ConfigFileError};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "JOURNAL_ANALYZER";

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "journal-analyzer.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generative service access
    #[serde(default)]
    pub api: ApiConfig,

    /// Request shaping
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Generative service connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Gemini API key. Absent means every analysis fails with a configuration error.
    #[serde(default = "default_api_key")]
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Overall request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: default_api_key(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// The credential, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn default_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .ok()
        .filter(|k| !k.trim().is_empty())
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Request shaping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sampling temperature. Kept low for literal answers.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Language of the prompt and of the sentinel strings
    #[serde(default)]
    pub language: PromptLanguage,

    /// Maximum size of an attached document (in MB)
    #[serde(default = "default_max_document_size")]
    pub max_document_size_mb: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            language: PromptLanguage::default(),
            max_document_size_mb: default_max_document_size(),
        }
    }
}

impl AnalysisConfig {
    pub fn max_document_bytes(&self) -> usize {
        self.max_document_size_mb.saturating_mul(1024 * 1024)
    }
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_document_size() -> usize {
    DEFAULT_MAX_DOCUMENT_BYTES / (1024 * 1024)
}

impl Config {
    /// Check values that would otherwise fail late, at request time.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        validate_url(&self.api.base_url)
            .map_err(|e| config::ConfigError::Message(format!("api.base_url: {}", e)))?;

        if self.api.model.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "api.model must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.analysis.temperature) {
            return Err(config::ConfigError::Message(format!(
                "analysis.temperature must be between 0.0 and 2.0, got {}",
                self.analysis.temperature
            )));
        }

        Ok(())
    }
}

/// Load configuration from a file, with environment overrides applied on top
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    build_config(Some(path), None)
}

/// Defaults plus environment overrides, for runs without a config file
pub fn get_config() -> Result<Config, config::ConfigError> {
    build_config(None, None)
}

/// Layer an optional file and the `JOURNAL_ANALYZER_*` overrides over the
/// defaults. `env` replaces the process environment when given.
fn build_config(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Look for a config file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = default_config_path()?;
    user.is_file().then_some(user)
}

/// Per-user config location, e.g. `~/.config/journal-analyzer/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("journal-analyzer").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.model, "gemini-2.5-flash");
        assert_eq!(config.analysis.temperature, 0.2);
        assert_eq!(config.analysis.language, PromptLanguage::Indonesian);
        assert_eq!(config.analysis.max_document_bytes(), DEFAULT_MAX_DOCUMENT_BYTES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_blank_is_none() {
        let mut api = ApiConfig::default();
        api.gemini_api_key = Some("   ".to_string());
        assert_eq!(api.api_key(), None);
        api.gemini_api_key = Some(" secret ".to_string());
        assert_eq!(api.api_key(), Some("secret"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let mut api = ApiConfig::default();
        api.gemini_api_key = Some("super-secret".to_string());
        let debug = format!("{:?}", api);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
gemini_api_key = "file-key"
model = "gemini-2.5-pro"
timeout_secs = 60

[analysis]
temperature = 0.1
language = "english"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.api_key(), Some("file-key"));
        assert_eq!(config.api.model, "gemini-2.5-pro");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.api.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.analysis.temperature, 0.1);
        assert_eq!(config.analysis.language, PromptLanguage::English);
    }

    #[test]
    fn test_load_config_rejects_bad_temperature() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\ntemperature = 3.5\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    fn overrides(vars: &[(&str, &str)]) -> config::Map<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_apply_without_file() {
        let env = overrides(&[
            ("JOURNAL_ANALYZER_API__GEMINI_API_KEY", "from-override"),
            ("JOURNAL_ANALYZER_API__MODEL", "gemini-2.5-pro"),
            ("JOURNAL_ANALYZER_ANALYSIS__LANGUAGE", "english"),
        ]);

        let config = build_config(None, Some(env)).unwrap();
        assert_eq!(config.api.api_key(), Some("from-override"));
        assert_eq!(config.api.model, "gemini-2.5-pro");
        assert_eq!(config.analysis.language, PromptLanguage::English);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_overrides_take_precedence_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nmodel = \"gemini-2.5-pro\"\ntimeout_secs = 60\n").unwrap();

        let env = overrides(&[("JOURNAL_ANALYZER_API__TIMEOUT_SECS", "30")]);
        let config = build_config(Some(&path), Some(env)).unwrap();
        assert_eq!(config.api.model, "gemini-2.5-pro");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_env_override_is_validated() {
        let env = overrides(&[("JOURNAL_ANALYZER_API__BASE_URL", "not a url")]);
        assert!(build_config(None, Some(env)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
